use thiserror::Error;

use crate::model::HouseLayout;
use crate::transform::TransformError;

/// Shown to the user whenever a transform does not produce a usable layout.
pub const ADVISORY_MESSAGE: &str = "Failed to update layout. Please try a different instruction.";

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("instruction is empty")]
    EmptyInstruction,
    #[error("a transform request is already in flight")]
    Busy,
}

/// Snapshot handed to the transform: the layout as it was when the user
/// pressed submit, plus the trimmed instruction.
#[derive(Clone, Debug)]
pub struct Submission {
    pub layout: HouseLayout,
    pub instruction: String,
}

/// In-memory editing state. At most one transform is outstanding; a
/// finished transform either replaces the whole layout or leaves it
/// untouched and raises the advisory.
#[derive(Clone, Debug)]
pub struct EditSession {
    layout: HouseLayout,
    initial: HouseLayout,
    pending: bool,
    advisory: Option<String>,
}

impl EditSession {
    pub fn new(initial: HouseLayout) -> Self {
        EditSession {
            layout: initial.clone(),
            initial,
            pending: false,
            advisory: None,
        }
    }

    pub fn layout(&self) -> &HouseLayout {
        &self.layout
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// Whether the submit control should accept input for `instruction`.
    pub fn can_submit(&self, instruction: &str) -> bool {
        !self.pending && !instruction.trim().is_empty()
    }

    pub fn submit(&mut self, instruction: &str) -> Result<Submission, SessionError> {
        if self.pending {
            return Err(SessionError::Busy);
        }
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(SessionError::EmptyInstruction);
        }
        self.pending = true;
        self.advisory = None;
        log::info!("submitting instruction: {instruction}");
        Ok(Submission {
            layout: self.layout.clone(),
            instruction: instruction.to_string(),
        })
    }

    /// Apply the outcome of the outstanding transform. Returns true when the
    /// layout was replaced.
    pub fn complete(&mut self, result: Result<HouseLayout, TransformError>) -> bool {
        self.pending = false;
        match result {
            Ok(layout) => {
                log::info!("layout replaced: {} floor(s)", layout.floors.len());
                self.layout = layout;
                true
            }
            Err(e) => {
                log::warn!("transform failed: {e}");
                self.advisory = Some(ADVISORY_MESSAGE.to_string());
                false
            }
        }
    }

    /// Submit and complete in one step with a synchronous transform.
    pub fn run<F>(&mut self, instruction: &str, transform: F) -> Result<bool, SessionError>
    where
        F: FnOnce(&HouseLayout, &str) -> Result<HouseLayout, TransformError>,
    {
        let sub = self.submit(instruction)?;
        let result = transform(&sub.layout, &sub.instruction);
        Ok(self.complete(result))
    }

    pub fn reset(&mut self) {
        self.layout = self.initial.clone();
        self.advisory = None;
    }
}
