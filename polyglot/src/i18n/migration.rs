use std::sync::Arc;

use super::{add_localization, is_localized, FieldClassifier, LocaleContext};
use crate::collection::Collection;
use crate::errors::{ErrorKind, PolyglotError, PolyglotResult};
use crate::filter::by_id;

/// A record the localization job could not migrate.
#[derive(Debug, Clone)]
pub struct MigrationFailure {
    id: Option<String>,
    error: PolyglotError,
}

impl MigrationFailure {
    pub fn new(id: Option<String>, error: PolyglotError) -> Self {
        MigrationFailure { id, error }
    }

    /// Identity of the failed record; `None` when it had no usable id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn error(&self) -> &PolyglotError {
        &self.error
    }
}

/// Outcome of [LocalizationMigration::run], record by record.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    migrated: Vec<String>,
    skipped: Vec<String>,
    failed: Vec<MigrationFailure>,
}

impl MigrationReport {
    /// Ids of the records seeded by this run.
    pub fn migrated(&self) -> &[String] {
        &self.migrated
    }

    /// Ids of the records that were localized already.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn failed(&self) -> &[MigrationFailure] {
        &self.failed
    }

    /// True when no record failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of records the run looked at.
    pub fn total(&self) -> usize {
        self.migrated.len() + self.skipped.len() + self.failed.len()
    }
}

/// Suspends user filtering on a collection until dropped.
///
/// The flag that was in place before is restored on drop, whichever way the
/// scope is left.
pub struct UserFilterGuard<'a> {
    collection: &'a Collection,
    was_disabled: bool,
}

impl<'a> UserFilterGuard<'a> {
    pub fn new(collection: &'a Collection) -> Self {
        let was_disabled = collection.disable_user_filter(true);
        log::debug!("User filter suspended on {}", collection.name());
        UserFilterGuard {
            collection,
            was_disabled,
        }
    }
}

impl Drop for UserFilterGuard<'_> {
    fn drop(&mut self) {
        self.collection.disable_user_filter(self.was_disabled);
        log::debug!("User filter restored on {}", self.collection.name());
    }
}

/// Seeds localization on every record of a collection.
///
/// Every record without a native language goes through [add_localization]
/// and is written back with an update scoped to its id. The job is not
/// transactional: a failing record is reported and the run moves on to the
/// next one, so a partial run leaves some records migrated and others not.
/// Running it again only touches the records that are still unlocalized.
pub struct LocalizationMigration {
    collection: Collection,
    classifier: Arc<FieldClassifier>,
    context: LocaleContext,
}

impl LocalizationMigration {
    pub fn new(
        collection: Collection,
        classifier: Arc<FieldClassifier>,
        context: LocaleContext,
    ) -> Self {
        LocalizationMigration {
            collection,
            classifier,
            context,
        }
    }

    /// Runs the job over all records, bypassing user filtering.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::MigrationError] only when the records cannot be
    /// listed; per-record failures are collected in the report instead.
    pub fn run(&self) -> PolyglotResult<MigrationReport> {
        let _guard = UserFilterGuard::new(&self.collection);
        let name = self.collection.name();
        log::info!("Starting localization of collection {}", name);

        let records = match self.collection.get_list(None, None, None, None) {
            Ok(list) => list.into_data(),
            Err(err) => {
                log::error!("Failed to list records of {}: {}", name, err);
                return Err(PolyglotError::new_with_cause(
                    &format!("Cannot list records of {}", name),
                    ErrorKind::MigrationError,
                    err,
                ));
            }
        };

        let mut report = MigrationReport::default();
        for record in records {
            let Some(id) = record.id() else {
                log::error!("Record without id in {}", name);
                report.failed.push(MigrationFailure::new(
                    None,
                    PolyglotError::new("Record has no usable id", ErrorKind::InvalidId),
                ));
                continue;
            };

            if is_localized(&record) {
                report.skipped.push(id);
                continue;
            }

            let localized = add_localization(&self.classifier, &self.context, &record);
            match self.collection.custom_update(&localized, &by_id(&id)) {
                Ok(0) => {
                    log::error!("Record {} disappeared from {} during migration", id, name);
                    let error = PolyglotError::new(
                        &format!("Record {} no longer exists", id),
                        ErrorKind::NotFound,
                    );
                    report.failed.push(MigrationFailure::new(Some(id), error));
                }
                Ok(_) => {
                    log::debug!("Localized record {} of {}", id, name);
                    report.migrated.push(id);
                }
                Err(err) => {
                    log::error!("Failed to localize record {} of {}: {}", id, name, err);
                    report.failed.push(MigrationFailure::new(Some(id), err));
                }
            }
        }

        log::info!(
            "Localization of {} done: {} migrated, {} skipped, {} failed",
            name,
            report.migrated.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }
}
