//! Submission state for create, update and delete actions.
//!
//! A form is idle until submitted, stays submitting until the server
//! answers, and then settles with a [`Notification`]. Nothing is applied
//! locally before the answer arrives, and a form that is still submitting
//! refuses a second submission.

use std::fmt::Display;

use thiserror::Error;

/// Shown for every failure that has no more specific hint.
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// How a resource is named to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    /// Capitalized singular, e.g. "Billboard".
    pub label: &'static str,
    /// Lowercase singular, e.g. "billboard".
    pub noun: &'static str,
    /// Records that block deletion while they reference this one.
    pub dependents: Option<&'static str>,
}

impl Entity {
    pub const STORE: Self = Self {
        label: "Store",
        noun: "store",
        dependents: Some("products and categories"),
    };
    pub const BILLBOARD: Self = Self {
        label: "Billboard",
        noun: "billboard",
        dependents: Some("categories"),
    };
    pub const CATEGORY: Self = Self {
        label: "Category",
        noun: "category",
        dependents: Some("products"),
    };
    pub const COLOR: Self = Self {
        label: "Color",
        noun: "color",
        dependents: Some("products"),
    };
    pub const SIZE: Self = Self {
        label: "Size",
        noun: "size",
        dependents: Some("products"),
    };
    pub const PRODUCT: Self = Self {
        label: "Product",
        noun: "product",
        dependents: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Outcome message for a settled submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    /// "Billboard created." and friends.
    #[must_use]
    pub fn success(entity: Entity, action: Action) -> Self {
        Self::Success(format!("{} {}.", entity.label, action.past_tense()))
    }

    /// Failures collapse to [`GENERIC_FAILURE`], except a failed delete of
    /// something other records can depend on.
    #[must_use]
    pub fn failure(entity: Entity, action: Action) -> Self {
        match (action, entity.dependents) {
            (Action::Delete, Some(dependents)) => Self::Error(format!(
                "Make sure you removed all {dependents} using this {} first.",
                entity.noun
            )),
            _ => Self::Error(GENERIC_FAILURE.to_string()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Settled(Notification),
}

/// Why a submission was not sent.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Delete was not confirmed")]
    NotConfirmed,
}

/// Explicit consent for a delete. Pending unless confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confirmation(bool);

impl Confirmation {
    #[must_use]
    pub const fn pending() -> Self {
        Self(false)
    }

    #[must_use]
    pub const fn confirmed() -> Self {
        Self(true)
    }

    /// Interpret a prompt answer. Only "y" or "yes" confirm.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        let answer = answer.trim();
        Self(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        self.0
    }
}

/// Submission state for one entity form.
#[derive(Debug)]
pub struct Form {
    entity: Entity,
    state: FormState,
}

impl Form {
    #[must_use]
    pub const fn new(entity: Entity) -> Self {
        Self {
            entity,
            state: FormState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    /// The notification of the last settled submission.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        match &self.state {
            FormState::Settled(notification) => Some(notification),
            FormState::Idle | FormState::Submitting => None,
        }
    }

    /// Enter the submitting state.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::AlreadySubmitting`] while a submission is in flight.
    pub fn begin(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        self.state = FormState::Submitting;
        Ok(())
    }

    /// Settle with the server's answer.
    pub fn settle<T, E: Display>(&mut self, action: Action, result: &Result<T, E>) {
        let notification = match result {
            Ok(_) => Notification::success(self.entity, action),
            Err(e) => {
                tracing::warn!(entity = self.entity.noun, ?action, error = %e, "Submission failed");
                Notification::failure(self.entity, action)
            }
        };
        self.state = FormState::Settled(notification);
    }

    /// Send `request` and settle with its result.
    ///
    /// The request future is not polled when the form refuses to submit.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::AlreadySubmitting`] while a submission is in flight.
    pub async fn submit<T, E, F>(
        &mut self,
        action: Action,
        request: F,
    ) -> Result<Result<T, E>, FormError>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        self.begin()?;
        let result = request.await;
        self.settle(action, &result);
        Ok(result)
    }

    /// Send a delete `request` once `confirmation` is given.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotConfirmed`] without sending anything when the
    /// delete was not confirmed, or [`FormError::AlreadySubmitting`].
    pub async fn delete<T, E, F>(
        &mut self,
        confirmation: Confirmation,
        request: F,
    ) -> Result<Result<T, E>, FormError>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        if !confirmation.is_confirmed() {
            return Err(FormError::NotConfirmed);
        }
        self.submit(Action::Delete, request).await
    }
}
