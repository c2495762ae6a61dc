use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{LoanFlowError, Result};

/// The eleven loan application fields, in canonical wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Gender,
    Married,
    Dependents,
    Education,
    SelfEmployed,
    ApplicantIncome,
    CoapplicantIncome,
    LoanAmount,
    LoanAmountTerm,
    CreditHistory,
    PropertyArea,
}

/// How a field is collected from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One value picked from a fixed list.
    Choice(&'static [&'static str]),
    /// Free numeric input, with the prompt shown to the user.
    Number { placeholder: &'static str },
}

impl Field {
    pub const COUNT: usize = 11;

    pub const ALL: [Field; Field::COUNT] = [
        Field::Gender,
        Field::Married,
        Field::Dependents,
        Field::Education,
        Field::SelfEmployed,
        Field::ApplicantIncome,
        Field::CoapplicantIncome,
        Field::LoanAmount,
        Field::LoanAmountTerm,
        Field::CreditHistory,
        Field::PropertyArea,
    ];

    /// Order in which the form presents the fields: choices first, then numbers.
    pub const FORM_ORDER: [Field; Field::COUNT] = [
        Field::Gender,
        Field::Married,
        Field::Dependents,
        Field::Education,
        Field::SelfEmployed,
        Field::PropertyArea,
        Field::CreditHistory,
        Field::ApplicantIncome,
        Field::CoapplicantIncome,
        Field::LoanAmount,
        Field::LoanAmountTerm,
    ];

    /// Name of the field as sent to the prediction service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Gender => "Gender",
            Field::Married => "Married",
            Field::Dependents => "Dependents",
            Field::Education => "Education",
            Field::SelfEmployed => "Self_Employed",
            Field::ApplicantIncome => "ApplicantIncome",
            Field::CoapplicantIncome => "CoapplicantIncome",
            Field::LoanAmount => "LoanAmount",
            Field::LoanAmountTerm => "Loan_Amount_Term",
            Field::CreditHistory => "Credit_History",
            Field::PropertyArea => "Property_Area",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Gender => FieldKind::Choice(&["Male", "Female"]),
            Field::Married => FieldKind::Choice(&["Yes", "No"]),
            Field::Dependents => FieldKind::Choice(&["0", "1", "2", "3+"]),
            Field::Education => FieldKind::Choice(&["Graduate", "Not Graduate"]),
            Field::SelfEmployed => FieldKind::Choice(&["Yes", "No"]),
            Field::PropertyArea => FieldKind::Choice(&["Urban", "Semiurban", "Rural"]),
            Field::CreditHistory => FieldKind::Choice(&["1", "0"]),
            Field::ApplicantIncome => FieldKind::Number {
                placeholder: "Income of applicant",
            },
            Field::CoapplicantIncome => FieldKind::Number {
                placeholder: "Income of co-applicant",
            },
            Field::LoanAmount => FieldKind::Number {
                placeholder: "Requested loan amount",
            },
            Field::LoanAmountTerm => FieldKind::Number {
                placeholder: "Loan term (in days)",
            },
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Field {
    type Err = LoanFlowError;

    fn from_str(name: &str) -> Result<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| LoanFlowError::UnknownField(name.to_string()))
    }
}

/// Current draft of a loan application.
///
/// Every field is always present; values start empty and are kept as the
/// user typed them until submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct FormState {
    values: [String; Field::COUNT],
}

impl FormState {
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|_| String::new()),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Set a field by its wire name. Unknown names are rejected and the
    /// state is left untouched.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field = name.parse::<Field>()?;
        self.set(field, value);
        Ok(())
    }

    /// Fields whose value is blank, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::FORM_ORDER
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fail with [`LoanFlowError::MissingFields`] unless every field is filled.
    pub fn ensure_complete(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoanFlowError::MissingFields(missing))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for FormState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, Value>> for FormState {
    type Error = LoanFlowError;

    /// Keys not given stay empty. Numbers are accepted and kept in their
    /// textual form; any other JSON type is a configuration error.
    fn try_from(entries: BTreeMap<String, Value>) -> Result<Self> {
        let mut form = FormState::new();
        for (name, value) in entries {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(LoanFlowError::Config(format!(
                        "field {name} must be a string or number, got {other}"
                    )));
                }
            };
            form.set_field(&name, text)?;
        }
        Ok(form)
    }
}
