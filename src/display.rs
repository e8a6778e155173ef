//! Presentation descriptors for credential statuses.
//!
//! Maps an [`ExpiryStatus`] to the label, colour, CSS classes and icon a UI
//! shows next to a credential.
//!
//! # Example
//!
//! ```
//! use wwc_validator::display::{status_display, status_display_for};
//! use wwc_validator::ExpiryStatus;
//!
//! let d = status_display(ExpiryStatus::ExpiringSoon);
//! assert_eq!(d.label, "Expiring Soon");
//! assert_eq!(d.color, "yellow");
//!
//! // Anything unrecognised falls back to the Unknown descriptor
//! assert_eq!(status_display_for("Pending").label, "Unknown");
//! ```

use crate::expiry::ExpiryStatus;
use std::fmt;

/// How a status is presented to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusDisplay {
    /// Status label.
    pub label: &'static str,
    /// Colour name (`green`, `yellow`, `red`, `gray`).
    pub color: &'static str,
    /// Background utility class, e.g. `bg-green-100`.
    pub bg_class: &'static str,
    /// Text utility class, e.g. `text-green-800`.
    pub text_class: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
}

impl fmt::Display for StatusDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.label)
    }
}

const ACTIVE: StatusDisplay = StatusDisplay {
    label: "Active",
    color: "green",
    bg_class: "bg-green-100",
    text_class: "text-green-800",
    icon: "✅",
};

const EXPIRING_SOON: StatusDisplay = StatusDisplay {
    label: "Expiring Soon",
    color: "yellow",
    bg_class: "bg-yellow-100",
    text_class: "text-yellow-800",
    icon: "⚠️",
};

const EXPIRED: StatusDisplay = StatusDisplay {
    label: "Expired",
    color: "red",
    bg_class: "bg-red-100",
    text_class: "text-red-800",
    icon: "❌",
};

const INVALID: StatusDisplay = StatusDisplay {
    label: "Invalid",
    color: "red",
    bg_class: "bg-red-100",
    text_class: "text-red-800",
    icon: "❌",
};

const UNKNOWN: StatusDisplay = StatusDisplay {
    label: "Unknown",
    color: "gray",
    bg_class: "bg-gray-100",
    text_class: "text-gray-800",
    icon: "❓",
};

/// Returns the descriptor for a status.
#[inline]
pub const fn status_display(status: ExpiryStatus) -> StatusDisplay {
    match status {
        ExpiryStatus::Active => ACTIVE,
        ExpiryStatus::ExpiringSoon => EXPIRING_SOON,
        ExpiryStatus::Expired => EXPIRED,
        ExpiryStatus::Invalid => INVALID,
        ExpiryStatus::Unknown => UNKNOWN,
    }
}

/// Returns the descriptor for a status given by name.
///
/// Accepts labels and variant names in any case (see
/// [`ExpiryStatus::from_label`]); anything else gets the Unknown
/// descriptor.
pub fn status_display_for(label: &str) -> StatusDisplay {
    ExpiryStatus::from_label(label).map_or(UNKNOWN, status_display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_matching_label() {
        for status in ExpiryStatus::ALL {
            assert_eq!(status_display(status).label, status.label());
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(status_display(ExpiryStatus::Active).color, "green");
        assert_eq!(status_display(ExpiryStatus::ExpiringSoon).color, "yellow");
        assert_eq!(status_display(ExpiryStatus::Expired).color, "red");
        assert_eq!(status_display(ExpiryStatus::Invalid).color, "red");
        assert_eq!(status_display(ExpiryStatus::Unknown).color, "gray");
    }

    #[test]
    fn test_classes_follow_color() {
        for status in ExpiryStatus::ALL {
            let d = status_display(status);
            assert_eq!(d.bg_class, format!("bg-{}-100", d.color));
            assert_eq!(d.text_class, format!("text-{}-800", d.color));
        }
    }

    #[test]
    fn test_lookup_by_label() {
        assert_eq!(status_display_for("Active"), ACTIVE);
        assert_eq!(status_display_for("expiring soon"), EXPIRING_SOON);
        assert_eq!(status_display_for("ExpiringSoon"), EXPIRING_SOON);
        assert_eq!(status_display_for("EXPIRED"), EXPIRED);
    }

    #[test]
    fn test_unrecognized_falls_back_to_unknown() {
        assert_eq!(status_display_for(""), UNKNOWN);
        assert_eq!(status_display_for("Suspended"), UNKNOWN);
    }

    #[test]
    fn test_display_impl() {
        assert_eq!(status_display(ExpiryStatus::Active).to_string(), "✅ Active");
    }
}
