//! Outcomes of translating a template that yield no constraint

use thiserror::Error;

use crate::model::{Datatype, PropertyId};

use super::ConstraintKind;

/// Contradictory constraint declarations
///
/// These point at inconsistent data in the wiki rather than at an
/// incomplete template, so they are reported instead of skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("illegal {kind} constraint on {property}: {reason}")]
    IllegalArgument {
        property: PropertyId,
        kind: ConstraintKind,
        reason: String,
    },
}

impl ConstraintError {
    pub fn illegal(property: &PropertyId, kind: ConstraintKind, reason: impl Into<String>) -> Self {
        Self::IllegalArgument {
            property: property.clone(),
            kind,
            reason: reason.into(),
        }
    }

    /// Create an error for a constraint kind that does not fit the datatype
    pub fn incompatible_datatype(
        property: &PropertyId,
        kind: ConstraintKind,
        datatype: Datatype,
    ) -> Self {
        Self::illegal(
            property,
            kind,
            format!("not applicable to properties of datatype {:?}", datatype),
        )
    }

    pub fn property(&self) -> &PropertyId {
        match self {
            Self::IllegalArgument { property, .. } => property,
        }
    }
}

/// Why a template produced no constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no constrained property")]
    NoProperty,
    #[error("unrecognized template '{0}'")]
    UnrecognizedTemplate(String),
    #[error("meta template {0} must be expanded before parsing")]
    MetaTemplate(ConstraintKind),
    #[error("missing parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("invalid value '{value}' for parameter '{parameter}'")]
    InvalidValue {
        parameter: &'static str,
        value: String,
    },
    #[error("unknown datatype of property {0}")]
    UnknownDatatype(PropertyId),
}

impl SkipReason {
    pub fn invalid(parameter: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter,
            value: value.into(),
        }
    }

    /// Whether the template was not a constraint template at all
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnrecognizedTemplate(_))
    }
}

/// Failure of a single kind parser
#[derive(Debug)]
pub(crate) enum Rejected {
    Skip(SkipReason),
    Illegal(ConstraintError),
}

impl From<SkipReason> for Rejected {
    fn from(reason: SkipReason) -> Self {
        Rejected::Skip(reason)
    }
}

impl From<ConstraintError> for Rejected {
    fn from(err: ConstraintError) -> Self {
        Rejected::Illegal(err)
    }
}
