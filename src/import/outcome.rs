// src/import/outcome.rs

/// Result of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Header did not match the template, or the file was not CSV at all.
    WrongTemplate,
    /// Header matched but there were no data rows.
    Empty,
    Processed {
        success: usize,
        warning: usize,
        failure: usize,
    },
}

impl ImportOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            ImportOutcome::WrongTemplate => "wrong_template",
            ImportOutcome::Empty => "empty",
            ImportOutcome::Processed { .. } => "processed",
        }
    }

    /// Legacy (success, warning, failure) triple: (-1,-1,-1) for a wrong
    /// template, (0,0,0) for an empty file.
    pub fn as_triple(&self) -> (i64, i64, i64) {
        match *self {
            ImportOutcome::WrongTemplate => (-1, -1, -1),
            ImportOutcome::Empty => (0, 0, 0),
            ImportOutcome::Processed {
                success,
                warning,
                failure,
            } => (success as i64, warning as i64, failure as i64),
        }
    }

    /// Message shown to the uploader.
    pub fn summary(&self) -> String {
        match *self {
            ImportOutcome::WrongTemplate => "Please use only the template file for uploads. \
                 Please do not alter the column titles."
                .to_string(),
            ImportOutcome::Empty => {
                "Upload failed. No data in file. Please resubmit file containing data.".to_string()
            }
            ImportOutcome::Processed {
                success,
                warning,
                failure,
            } => format!(
                "File uploaded with {success} successful row(s), {failure} failed row(s), \
                 and {warning} warning(s). Please review log file for more detailed information."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples_keep_the_legacy_sentinels() {
        assert_eq!(ImportOutcome::WrongTemplate.as_triple(), (-1, -1, -1));
        assert_eq!(ImportOutcome::Empty.as_triple(), (0, 0, 0));
        let p = ImportOutcome::Processed {
            success: 3,
            warning: 1,
            failure: 2,
        };
        assert_eq!(p.as_triple(), (3, 1, 2));
    }

    #[test]
    fn summary_orders_failed_before_warnings() {
        let p = ImportOutcome::Processed {
            success: 3,
            warning: 1,
            failure: 2,
        };
        assert_eq!(
            p.summary(),
            "File uploaded with 3 successful row(s), 2 failed row(s), and 1 warning(s). \
             Please review log file for more detailed information."
        );
        assert!(ImportOutcome::WrongTemplate.summary().contains("template file"));
    }
}
