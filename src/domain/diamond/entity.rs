//! Diamond attributes and the prediction input record

use serde::{Deserialize, Serialize};

use super::validation::{validate_carat, validate_dimension, validate_table};
use crate::domain::DomainError;

/// Cut quality, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cut {
    Fair,
    Good,
    VeryGood,
    Premium,
    Ideal,
}

impl Cut {
    pub const ALL: [Cut; 5] = [
        Cut::Fair,
        Cut::Good,
        Cut::VeryGood,
        Cut::Premium,
        Cut::Ideal,
    ];

    /// Category label as seen by the encoder
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
            Self::Premium => "Premium",
            Self::Ideal => "Ideal",
        }
    }
}

/// Color grade, ordered worst (J) to best (D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    J,
    I,
    H,
    G,
    F,
    E,
    D,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::J,
        Color::I,
        Color::H,
        Color::G,
        Color::F,
        Color::E,
        Color::D,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::J => "J",
            Self::I => "I",
            Self::H => "H",
            Self::G => "G",
            Self::F => "F",
            Self::E => "E",
            Self::D => "D",
        }
    }
}

/// Clarity grade, ordered worst (I1) to best (IF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Clarity {
    I1,
    Si2,
    Si1,
    Vs2,
    Vs1,
    Vvs2,
    Vvs1,
    If,
}

impl Clarity {
    pub const ALL: [Clarity; 8] = [
        Clarity::I1,
        Clarity::Si2,
        Clarity::Si1,
        Clarity::Vs2,
        Clarity::Vs1,
        Clarity::Vvs2,
        Clarity::Vvs1,
        Clarity::If,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::I1 => "I1",
            Self::Si2 => "SI2",
            Self::Si1 => "SI1",
            Self::Vs2 => "VS2",
            Self::Vs1 => "VS1",
            Self::Vvs2 => "VVS2",
            Self::Vvs1 => "VVS1",
            Self::If => "IF",
        }
    }
}

fn parse_label<T: Copy>(
    column: &str,
    value: &str,
    all: &[T],
    label: fn(&T) -> &'static str,
) -> Result<T, DomainError> {
    all.iter()
        .find(|candidate| label(*candidate) == value)
        .copied()
        .ok_or_else(|| {
            DomainError::encoding(format!(
                "Unknown category '{}' for column '{}'",
                value, column
            ))
        })
}

impl std::str::FromStr for Cut {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("cut", s, &Self::ALL, Self::label)
    }
}

impl std::str::FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("color", s, &Self::ALL, Self::label)
    }
}

impl std::str::FromStr for Clarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("clarity", s, &Self::ALL, Self::label)
    }
}

macro_rules! label_conversions {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = DomainError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.label().to_string()
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.label())
                }
            }
        )*
    };
}

label_conversions!(Cut, Color, Clarity);

/// Raw form submission, before range validation and category parsing.
///
/// Shared by the HTML form and the JSON API so both reject bad input the
/// same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionForm {
    pub carat: f64,
    #[serde(default)]
    pub cut: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub clarity: String,
    pub table: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Validated input for one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    carat: f64,
    cut: Cut,
    color: Color,
    clarity: Clarity,
    table: f64,
    x: f64,
    y: f64,
    z: f64,
}

impl PredictionInput {
    pub fn carat(&self) -> f64 {
        self.carat
    }

    pub fn cut(&self) -> Cut {
        self.cut
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn clarity(&self) -> Clarity {
        self.clarity
    }

    pub fn table(&self) -> f64 {
        self.table
    }

    /// Length in mm
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Width in mm
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Depth in mm
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Categorical labels in encoder column order: cut, color, clarity
    pub fn categorical_row(&self) -> [&'static str; 3] {
        [self.cut.label(), self.color.label(), self.clarity.label()]
    }

    /// Numeric values in regressor column order: carat, table, x, y, z
    pub fn numeric_row(&self) -> [f64; 5] {
        [self.carat, self.table, self.x, self.y, self.z]
    }
}

impl TryFrom<PredictionForm> for PredictionInput {
    type Error = DomainError;

    /// Numeric ranges are checked first, then the categorical labels.
    fn try_from(form: PredictionForm) -> Result<Self, Self::Error> {
        validate_carat(form.carat)?;
        validate_table(form.table)?;
        validate_dimension("x", form.x)?;
        validate_dimension("y", form.y)?;
        validate_dimension("z", form.z)?;

        Ok(Self {
            carat: form.carat,
            cut: form.cut.parse()?,
            color: form.color.parse()?,
            clarity: form.clarity.parse()?,
            table: form.table,
            x: form.x,
            y: form.y,
            z: form.z,
        })
    }
}

impl From<&PredictionInput> for PredictionForm {
    fn from(input: &PredictionInput) -> Self {
        Self {
            carat: input.carat,
            cut: input.cut.label().to_string(),
            color: input.color.label().to_string(),
            clarity: input.clarity.label().to_string(),
            table: input.table,
            x: input.x,
            y: input.y,
            z: input.z,
        }
    }
}

impl Default for PredictionForm {
    /// Minimum of every range and the first category, like a fresh form
    fn default() -> Self {
        Self {
            carat: 0.1,
            cut: Cut::Fair.label().to_string(),
            color: Color::J.label().to_string(),
            clarity: Clarity::I1.label().to_string(),
            table: 50.0,
            x: 0.1,
            y: 0.1,
            z: 0.1,
        }
    }
}
