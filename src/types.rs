// Ref: pokemon-showdown/data/typechart.ts (multipliers only, per generation).
use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Type {
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Type {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Type::Normal,
            "fire" => Type::Fire,
            "water" => Type::Water,
            "electric" => Type::Electric,
            "grass" => Type::Grass,
            "ice" => Type::Ice,
            "fighting" => Type::Fighting,
            "poison" => Type::Poison,
            "ground" => Type::Ground,
            "flying" => Type::Flying,
            "psychic" => Type::Psychic,
            "bug" => Type::Bug,
            "rock" => Type::Rock,
            "ghost" => Type::Ghost,
            "dragon" => Type::Dragon,
            "dark" => Type::Dark,
            "steel" => Type::Steel,
            "fairy" => Type::Fairy,
            _ => return Err(()),
        };
        Ok(t)
    }
}

/// Chart families. Gen 1 and Gens 2-5 differ from the modern chart in a
/// handful of matchups; everything from Gen 6 on shares one table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChartGeneration {
    Gen1,
    Gen2To5,
    Gen6Plus,
}

impl ChartGeneration {
    pub fn from_number(gen: u8) -> Self {
        match gen {
            1 => ChartGeneration::Gen1,
            2..=5 => ChartGeneration::Gen2To5,
            _ => ChartGeneration::Gen6Plus,
        }
    }
}

/// Attacking x defending multiplier table for one chart family.
#[derive(Clone, Debug)]
pub struct TypeChart {
    generation: ChartGeneration,
    table: [[f32; 18]; 18],
}

static GEN1_CHART: Lazy<TypeChart> = Lazy::new(|| TypeChart::build(ChartGeneration::Gen1));
static GEN2_CHART: Lazy<TypeChart> = Lazy::new(|| TypeChart::build(ChartGeneration::Gen2To5));
static GEN6_CHART: Lazy<TypeChart> = Lazy::new(|| TypeChart::build(ChartGeneration::Gen6Plus));

impl TypeChart {
    fn build(generation: ChartGeneration) -> Self {
        let mut table = [[1.0; 18]; 18];
        for attacking in Type::ALL {
            for defending in Type::ALL {
                table[attacking.index()][defending.index()] =
                    generation_multiplier(generation, attacking, defending);
            }
        }
        TypeChart { generation, table }
    }

    pub fn for_generation(generation: ChartGeneration) -> &'static TypeChart {
        match generation {
            ChartGeneration::Gen1 => &*GEN1_CHART,
            ChartGeneration::Gen2To5 => &*GEN2_CHART,
            ChartGeneration::Gen6Plus => &*GEN6_CHART,
        }
    }

    /// Resolve the chart from a format id such as `gen9randomdoublesbattle`.
    /// Formats without a recognizable `genN` prefix use the latest chart.
    pub fn for_format(format: &str) -> &'static TypeChart {
        Self::for_generation(ChartGeneration::from_number(
            format_generation(format).unwrap_or(9),
        ))
    }

    pub fn generation(&self) -> ChartGeneration {
        self.generation
    }

    /// Product of per-type multipliers. Unknown type names count as neutral.
    pub fn effectiveness(&self, move_type: &str, target_types: &[String]) -> f32 {
        let Ok(attacking) = move_type.parse::<Type>() else {
            return 1.0;
        };
        let mut multiplier = 1.0;
        for t in target_types {
            if let Ok(defending) = t.parse::<Type>() {
                multiplier *= self.table[attacking.index()][defending.index()];
            }
        }
        multiplier
    }
}

fn generation_multiplier(generation: ChartGeneration, attacking: Type, defending: Type) -> f32 {
    match generation {
        ChartGeneration::Gen6Plus => modern(attacking, defending),
        ChartGeneration::Gen2To5 => {
            if attacking == Type::Fairy || defending == Type::Fairy {
                return 1.0;
            }
            match (attacking, defending) {
                (Type::Ghost, Type::Steel) | (Type::Dark, Type::Steel) => 0.5,
                _ => modern(attacking, defending),
            }
        }
        ChartGeneration::Gen1 => {
            if matches!(attacking, Type::Dark | Type::Steel | Type::Fairy)
                || matches!(defending, Type::Dark | Type::Steel | Type::Fairy)
            {
                return 1.0;
            }
            match (attacking, defending) {
                (Type::Ghost, Type::Psychic) => 0.0,
                (Type::Bug, Type::Poison) | (Type::Poison, Type::Bug) => 2.0,
                (Type::Ice, Type::Fire) => 1.0,
                _ => modern(attacking, defending),
            }
        }
    }
}

fn format_generation(format: &str) -> Option<u8> {
    let rest = format.trim().to_ascii_lowercase();
    let digits: String = rest
        .strip_prefix("gen")?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn modern(attacking: Type, defending: Type) -> f32 {
    use Type::*;
    match attacking {
        Normal => match defending {
            Rock | Steel => 0.5,
            Ghost => 0.0,
            _ => 1.0,
        },
        Fire => match defending {
            Fire | Water | Rock | Dragon => 0.5,
            Grass | Ice | Bug | Steel => 2.0,
            _ => 1.0,
        },
        Water => match defending {
            Water | Grass | Dragon => 0.5,
            Fire | Ground | Rock => 2.0,
            _ => 1.0,
        },
        Electric => match defending {
            Electric | Grass | Dragon => 0.5,
            Water | Flying => 2.0,
            Ground => 0.0,
            _ => 1.0,
        },
        Grass => match defending {
            Fire | Grass | Poison | Flying | Bug | Dragon | Steel => 0.5,
            Water | Ground | Rock => 2.0,
            _ => 1.0,
        },
        Ice => match defending {
            Fire | Water | Ice | Steel => 0.5,
            Grass | Ground | Flying | Dragon => 2.0,
            _ => 1.0,
        },
        Fighting => match defending {
            Normal | Ice | Rock | Dark | Steel => 2.0,
            Poison | Flying | Psychic | Bug | Fairy => 0.5,
            Ghost => 0.0,
            _ => 1.0,
        },
        Poison => match defending {
            Grass | Fairy => 2.0,
            Poison | Ground | Rock | Ghost => 0.5,
            Steel => 0.0,
            _ => 1.0,
        },
        Ground => match defending {
            Fire | Electric | Poison | Rock | Steel => 2.0,
            Grass | Bug => 0.5,
            Flying => 0.0,
            _ => 1.0,
        },
        Flying => match defending {
            Grass | Fighting | Bug => 2.0,
            Electric | Rock | Steel => 0.5,
            _ => 1.0,
        },
        Psychic => match defending {
            Fighting | Poison => 2.0,
            Psychic | Steel => 0.5,
            Dark => 0.0,
            _ => 1.0,
        },
        Bug => match defending {
            Grass | Psychic | Dark => 2.0,
            Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy => 0.5,
            _ => 1.0,
        },
        Rock => match defending {
            Fire | Ice | Flying | Bug => 2.0,
            Fighting | Ground | Steel => 0.5,
            _ => 1.0,
        },
        Ghost => match defending {
            Ghost | Psychic => 2.0,
            Dark => 0.5,
            Normal => 0.0,
            _ => 1.0,
        },
        Dragon => match defending {
            Dragon => 2.0,
            Steel => 0.5,
            Fairy => 0.0,
            _ => 1.0,
        },
        Dark => match defending {
            Psychic | Ghost => 2.0,
            Fighting | Dark | Fairy => 0.5,
            _ => 1.0,
        },
        Steel => match defending {
            Rock | Ice | Fairy => 2.0,
            Fire | Water | Electric | Steel => 0.5,
            _ => 1.0,
        },
        Fairy => match defending {
            Fighting | Dragon | Dark => 2.0,
            Fire | Poison | Steel => 0.5,
            _ => 1.0,
        },
    }
}
