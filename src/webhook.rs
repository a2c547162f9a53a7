use std::path::Path;
use tracing::info;

use crate::error::SpliceResult;
use crate::splice::{Replacement, Splicer};

const IMPORT_MARKER: &str = "import (";
const DEFAULTING_TODO: &str = "// TODO(user): fill in your defaulting logic.";
const CREATE_VALIDATION_TODO: &str =
    "// TODO(user): fill in your validation logic upon object creation.";
const UPDATE_VALIDATION_TODO: &str =
    "// TODO(user): fill in your validation logic upon object update.";

const ERRORS_IMPORT: &str = "import (\n\t\"errors\"";

const DEFAULTING_LOGIC: &str = "if r.Spec.Count == 0 {
		r.Spec.Count = 5
	}";

const VALIDATION_LOGIC: &str = "if r.Spec.Count < 0 {
		return errors.New(\".spec.count must >= 0\")
	}";

/// The substitutions that turn a scaffolded webhook into a working sample
pub fn webhook_replacements() -> Vec<Replacement> {
    vec![
        Replacement::new(IMPORT_MARKER, ERRORS_IMPORT),
        Replacement::new(DEFAULTING_TODO, DEFAULTING_LOGIC),
        Replacement::new(CREATE_VALIDATION_TODO, VALIDATION_LOGIC),
        Replacement::new(UPDATE_VALIDATION_TODO, VALIDATION_LOGIC),
    ]
}

impl Splicer {
    /// Fill in the defaulting and validation TODOs of a scaffolded webhook
    pub fn implement_webhooks(&self, path: impl AsRef<Path>) -> SpliceResult<()> {
        let path = path.as_ref();
        self.replace_in_file(path, &webhook_replacements())?;
        info!("Implemented sample webhook logic in {}", path.display());
        Ok(())
    }
}

/// [`Splicer::implement_webhooks`] with the default config
pub fn implement_webhooks(path: impl AsRef<Path>) -> SpliceResult<()> {
    Splicer::default().implement_webhooks(path)
}
