mod address;
mod contact;
mod lead;
mod step;
mod widget;

use crate::editor::EditorError;
use crate::footprint::FootprintLookupError;
use crate::geocode::GeocodeError;

pub use address::{AddressForm, MIN_ADDRESS_LEN};
pub use contact::{is_valid_email, ContactDetails};
pub use lead::LeadBundle;
pub use step::Step;
pub use widget::{Property, WidgetFlow};

/// Step-level failures. All are recoverable within the session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("address must be at least {min} characters (got {0})", min = MIN_ADDRESS_LEN)]
    AddressTooShort(usize),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    FootprintLookup(#[from] FootprintLookupError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("a property lookup is already in progress")]
    LookupInProgress,

    #[error("no property lookup is in progress")]
    NoLookupPending,

    #[error("cannot {action} during step {step}")]
    WrongStep { step: Step, action: &'static str },

    #[error("the roof outline is still being edited; save or cancel first")]
    PolygonNotFinalized,

    #[error("select a roof pitch first")]
    PitchNotSelected,

    #[error("select a pricing tier first")]
    TierNotSelected,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid email address {0:?}")]
    InvalidEmail(String),
}

/// Progress of the geocode + footprint lookup behind the first step.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Failed(FlowError),
    Ready,
}

impl LookupStatus {
    #[inline] pub fn is_loading(&self) -> bool { matches!(self, LookupStatus::Loading) }

    #[inline]
    pub fn error(&self) -> Option<&FlowError> {
        match self {
            LookupStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}
