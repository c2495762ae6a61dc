use crate::{
    error::Result,
    form::{Field, FormState},
    prediction::Prediction,
};

/// Identity of one submission cycle. Only the latest issued ticket may
/// update the result.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub seq: u64,
    /// Form as it was when the cycle started; later edits don't affect it.
    pub form: FormState,
}

/// What happened when a response was handed back to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer submission was started after this one; the response was dropped.
    Stale { latest: u64 },
}

/// Everything the front end renders from: the draft form, the current
/// prediction and whether a request is in flight.
///
/// All transitions are plain methods without I/O so they can be driven
/// directly from tests.
#[derive(Debug, Clone, Default)]
pub struct LoanApplication {
    form: FormState,
    prediction: Option<Prediction>,
    loading: bool,
    latest_seq: u64,
}

impl LoanApplication {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Record a user edit by wire name.
    pub fn apply_field_edit(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.form.set_field(name, value)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Start a new cycle: clear the prediction, raise the loading flag and
    /// hand out the next sequence number with a snapshot of the form.
    pub fn begin_submission(&mut self) -> SubmissionTicket {
        self.latest_seq += 1;
        self.loading = true;
        self.prediction = None;
        SubmissionTicket {
            seq: self.latest_seq,
            form: self.form.clone(),
        }
    }

    /// Apply the outcome of cycle `seq` if it is still the latest one.
    pub fn resolve_submission(&mut self, seq: u64, prediction: Prediction) -> Resolution {
        if seq != self.latest_seq {
            return Resolution::Stale {
                latest: self.latest_seq,
            };
        }
        self.prediction = Some(prediction);
        self.loading = false;
        Resolution::Applied
    }
}
