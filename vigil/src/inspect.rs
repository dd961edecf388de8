//! Inspection scenarios for site-safety monitoring.
//!
//! Each task pairs a fixed system instruction with one inspected image. The
//! instructions pin the model to a bracketed verdict phrase so downstream
//! consumers can match on the answer prefix.

use crate::media::EncodedImage;
use crate::message::ChatMessage;
use std::str::FromStr;

/// A visual inspection task with a fixed system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InspectionTask {
    /// Detect whether any person has entered the monitored area.
    AreaIntrusion,
    /// Detect whether any person has entered the marked danger zone.
    DangerZoneIntrusion,
    /// Detect whether personnel are wearing safety helmets.
    HelmetPresence,
    /// Detect whether personnel are wearing safety helmets correctly.
    HelmetWear,
}

impl InspectionTask {
    /// All defined tasks, in presentation order.
    pub const ALL: [Self; 4] = [
        Self::AreaIntrusion,
        Self::DangerZoneIntrusion,
        Self::HelmetPresence,
        Self::HelmetWear,
    ];

    /// Get the kebab-case name of the task.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AreaIntrusion => "area-intrusion",
            Self::DangerZoneIntrusion => "danger-zone-intrusion",
            Self::HelmetPresence => "helmet-presence",
            Self::HelmetWear => "helmet-wear",
        }
    }

    /// Get the system instruction for this task.
    ///
    /// Each instruction fixes the verdict phrasing the model must use, so the
    /// answer always starts with a bracketed task marker.
    #[must_use]
    pub const fn system_prompt(&self) -> &'static str {
        match self {
            Self::AreaIntrusion => {
                "You are an area intrusion detection assistant. Only check whether any \
                 person has entered the monitored area in the image. If a person has \
                 entered the area, reply \"[Area Intrusion] Person detected in the area\" \
                 and describe the intruder's state; otherwise reply \"[Area Intrusion] \
                 No person in the area\"."
            }
            Self::DangerZoneIntrusion => {
                "You are a danger zone intrusion detection assistant. Only check whether \
                 any person has entered the red zone in the image. If a person has \
                 entered the red zone, reply \"[Danger Zone] Person detected in the red \
                 zone\" and describe the intruder's state; otherwise reply \"[Danger \
                 Zone] No person in the red zone\"."
            }
            Self::HelmetPresence => {
                "You are a safety helmet detection assistant. Only check whether the \
                 personnel in the image are wearing safety helmets. If they are, reply \
                 \"[Helmet] Personnel are wearing safety helmets\"; otherwise reply \
                 \"[Helmet] Personnel are not wearing safety helmets\"."
            }
            Self::HelmetWear => {
                "You are a helmet wear compliance assistant. Only check whether the \
                 personnel in the image are wearing safety helmets correctly. If they \
                 are, reply \"[Helmet Wear] Personnel are wearing helmets correctly\"; \
                 otherwise reply \"[Helmet Wear] Personnel are not wearing helmets \
                 correctly\" and describe their current state."
            }
        }
    }

    /// Build the conversation for this task around one inspected image.
    #[must_use]
    pub fn conversation(&self, image: &EncodedImage) -> Vec<ChatMessage> {
        build_conversation(self.system_prompt(), image)
    }
}

impl std::fmt::Display for InspectionTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown task name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown inspection task: {0} (expected one of: area-intrusion, danger-zone-intrusion, helmet-presence, helmet-wear)")]
pub struct UnknownTask(String);

impl FromStr for InspectionTask {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area-intrusion" => Ok(Self::AreaIntrusion),
            "danger-zone-intrusion" => Ok(Self::DangerZoneIntrusion),
            "helmet-presence" => Ok(Self::HelmetPresence),
            "helmet-wear" => Ok(Self::HelmetWear),
            other => Err(UnknownTask(other.to_string())),
        }
    }
}

/// Build a one-turn inspection conversation.
///
/// Returns exactly one system message followed by exactly one user message
/// carrying the inspected image as its only content part.
#[must_use]
pub fn build_conversation(system_prompt: &str, image: &EncodedImage) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user_image(image),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageFormat;
    use crate::message::MessageRole;

    #[test]
    fn conversation_is_one_system_then_one_user_image() {
        let image = EncodedImage::from_bytes(&[0xFF, 0xD8, 0xFF], ImageFormat::Jpeg);
        let messages = InspectionTask::HelmetPresence.conversation(&image);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(
            messages[0].first_text(),
            Some(InspectionTask::HelmetPresence.system_prompt())
        );
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content.len(), 1);
        assert!(messages[1].content[0].is_image());
    }

    #[test]
    fn task_names_round_trip() {
        for task in InspectionTask::ALL {
            assert_eq!(task.as_str().parse::<InspectionTask>().unwrap(), task);
        }
        assert!("ppe-check".parse::<InspectionTask>().is_err());
    }
}
