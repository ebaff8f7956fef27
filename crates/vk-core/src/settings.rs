//! Global library settings.
//!
//! [`Settings`] holds the **evaluation date**, the date at which all
//! calculations are performed.  It is a process-wide singleton accessed via
//! a `std::sync::OnceLock`.
//!
//! The evaluation date is stored as a date serial number so that this crate
//! stays independent of the date type.  Tests that change it should use
//! [`ScopedEvaluationDate`], which restores the previous value on drop.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Process-wide settings used by the valkit library.
#[derive(Debug)]
pub struct Settings {
    evaluation_date: Mutex<Option<i32>>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            evaluation_date: Mutex::new(None),
        })
    }

    /// The current evaluation date serial number, if one has been set.
    pub fn evaluation_date_serial(&self) -> Option<i32> {
        *self.lock()
    }

    /// Set the evaluation date as a serial number.
    pub fn set_evaluation_date_serial(&self, serial: i32) {
        tracing::debug!(serial, "evaluation date set");
        *self.lock() = Some(serial);
    }

    /// Clear the evaluation date.
    pub fn reset_evaluation_date(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<i32>> {
        self.evaluation_date
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sets the evaluation date for the lifetime of the guard.
#[derive(Debug)]
#[must_use = "the previous evaluation date is restored when the guard drops"]
pub struct ScopedEvaluationDate {
    previous: Option<i32>,
}

impl ScopedEvaluationDate {
    /// Set the evaluation date to `serial` until the guard is dropped.
    pub fn new(serial: i32) -> Self {
        let settings = Settings::instance();
        let previous = settings.evaluation_date_serial();
        settings.set_evaluation_date_serial(serial);
        Self { previous }
    }
}

impl Drop for ScopedEvaluationDate {
    fn drop(&mut self) {
        let settings = Settings::instance();
        match self.previous {
            Some(serial) => settings.set_evaluation_date_serial(serial),
            None => settings.reset_evaluation_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_date_restores_previous_value() {
        let before = Settings::instance().evaluation_date_serial();
        {
            let _guard = ScopedEvaluationDate::new(45_000);
            assert_eq!(Settings::instance().evaluation_date_serial(), Some(45_000));
        }
        assert_eq!(Settings::instance().evaluation_date_serial(), before);
    }
}
