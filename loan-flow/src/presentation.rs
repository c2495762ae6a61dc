use std::fmt;

use crate::{prediction::Prediction, state::LoanApplication};

pub const APPROVED_TEXT: &str = "Loan Approved ✅";
pub const REJECTED_TEXT: &str = "Loan Rejected ❌";

/// Which of the four result displays to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No submission yet, or one is in flight.
    Hidden,
    Approved,
    Rejected,
    Message(String),
}

impl Outcome {
    pub fn of(app: &LoanApplication) -> Self {
        Self::from(app.prediction())
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Outcome::Hidden)
    }
}

impl From<Option<&Prediction>> for Outcome {
    fn from(prediction: Option<&Prediction>) -> Self {
        match prediction {
            None => Outcome::Hidden,
            Some(Prediction::Approved) => Outcome::Approved,
            Some(Prediction::Rejected) => Outcome::Rejected,
            Some(Prediction::Message(message)) => Outcome::Message(message.clone()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hidden => Ok(()),
            Outcome::Approved => f.write_str(APPROVED_TEXT),
            Outcome::Rejected => f.write_str(REJECTED_TEXT),
            Outcome::Message(message) => f.write_str(message),
        }
    }
}

/// Label of the submit control.
pub fn submit_label(app: &LoanApplication) -> &'static str {
    if app.is_loading() {
        "Predicting..."
    } else {
        "Predict"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_prediction_to_one_display() {
        assert_eq!(Outcome::from(None), Outcome::Hidden);
        assert_eq!(Outcome::from(Some(&Prediction::Approved)), Outcome::Approved);
        assert_eq!(Outcome::from(Some(&Prediction::Rejected)), Outcome::Rejected);
        assert_eq!(
            Outcome::from(Some(&Prediction::Message("Maybe".into()))),
            Outcome::Message("Maybe".into())
        );
    }

    #[test]
    fn renders_text() {
        assert_eq!(Outcome::Hidden.to_string(), "");
        assert_eq!(Outcome::Approved.to_string(), "Loan Approved ✅");
        assert_eq!(Outcome::Rejected.to_string(), "Loan Rejected ❌");
        assert_eq!(
            Outcome::from(Some(&Prediction::server_error())).to_string(),
            "Server Error"
        );
        // An answer with neither field still shows, just empty.
        let empty = Outcome::Message(String::new());
        assert!(empty.is_visible());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn pending_submission_hides_result_and_relabels_button() {
        let mut app = LoanApplication::new();
        assert_eq!(submit_label(&app), "Predict");

        let ticket = app.begin_submission();
        assert_eq!(Outcome::of(&app), Outcome::Hidden);
        assert_eq!(submit_label(&app), "Predicting...");

        app.resolve_submission(ticket.seq, Prediction::Approved);
        assert_eq!(Outcome::of(&app), Outcome::Approved);
        assert_eq!(submit_label(&app), "Predict");
    }
}
