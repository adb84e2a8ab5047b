use std::fmt;
use std::future::Future;

use tracing::{debug, error};

use crate::core::Result;

/// One durable write within a multi-collection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    SaveCategories,
    SaveTourCategories,
    SaveMunicipalities,
    SavePointsOfInterest,
    SaveTours,
}

impl fmt::Display for CascadeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CascadeStep::SaveCategories => "save categories",
            CascadeStep::SaveTourCategories => "save tour categories",
            CascadeStep::SaveMunicipalities => "save municipalities",
            CascadeStep::SavePointsOfInterest => "save points of interest",
            CascadeStep::SaveTours => "save tours",
        };
        f.write_str(name)
    }
}

/// Ordered sequence of collection writes for one mutation.
///
/// There is no compensation: when a step fails, the steps already completed
/// stay on disk. The failure is logged together with the completed steps and
/// returned to the caller unchanged.
#[derive(Debug)]
pub struct Saga {
    operation: &'static str,
    completed: Vec<CascadeStep>,
}

impl Saga {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            completed: Vec::new(),
        }
    }

    pub async fn step<F, T>(&mut self, step: CascadeStep, write: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match write.await {
            Ok(value) => {
                debug!(operation = self.operation, step = %step, "cascade step completed");
                self.completed.push(step);
                Ok(value)
            }
            Err(err) if self.completed.is_empty() => {
                error!(
                    operation = self.operation,
                    step = %step,
                    error = %err,
                    "cascade aborted before any write"
                );
                Err(err)
            }
            Err(err) => {
                error!(
                    operation = self.operation,
                    step = %step,
                    completed = ?self.completed,
                    error = %err,
                    "cascade aborted; completed steps are not rolled back"
                );
                Err(err)
            }
        }
    }

    pub fn completed(&self) -> &[CascadeStep] {
        &self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CatalogError;

    #[tokio::test]
    async fn records_completed_steps_in_order() {
        let mut saga = Saga::new("rename category");
        saga.step(CascadeStep::SavePointsOfInterest, async { Ok(()) })
            .await
            .unwrap();
        saga.step(CascadeStep::SaveCategories, async { Ok(()) })
            .await
            .unwrap();

        assert_eq!(
            saga.completed(),
            &[CascadeStep::SavePointsOfInterest, CascadeStep::SaveCategories]
        );
    }

    #[tokio::test]
    async fn failure_keeps_earlier_steps_and_returns_the_error() {
        let mut saga = Saga::new("delete municipality");
        saga.step(CascadeStep::SavePointsOfInterest, async { Ok(()) })
            .await
            .unwrap();

        let err = saga
            .step(CascadeStep::SaveMunicipalities, async {
                Err::<(), _>(CatalogError::validation("disk full"))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(saga.completed(), &[CascadeStep::SavePointsOfInterest]);
    }

    #[test]
    fn steps_display_readably() {
        assert_eq!(CascadeStep::SaveTours.to_string(), "save tours");
    }
}
