use std::fmt;

use serde::{Deserialize, Serialize};

pub type EntityId = u64;

/// Fixed page size used for every list request in a session.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Pending,
    Approved,
    Rejected,
    Draft,
}

impl AdStatus {
    pub const ALL: [AdStatus; 4] = [
        AdStatus::Pending,
        AdStatus::Approved,
        AdStatus::Rejected,
        AdStatus::Draft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdStatus::Pending => "pending",
            AdStatus::Approved => "approved",
            AdStatus::Rejected => "rejected",
            AdStatus::Draft => "draft",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for AdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

/// One advertisement as returned by the moderation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_id: Option<u32>,
    pub status: AdStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of entities plus the pagination metadata of the list fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    pub entities: Vec<Advertisement>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
}

impl ResultPage {
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|ad| ad.id).collect()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|ad| ad.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Reason and free-text comment attached to a rejection or change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Verdict {
    pub fn new(reason: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            reason: reason.into(),
            comment: comment.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Rejection reasons accepted by the backend.
pub const REJECTION_REASONS: [&str; 6] = [
    "Запрещенный товар",
    "Неверная категория",
    "Некорректное описание",
    "Проблемы с фото",
    "Подозрение на мошенничество",
    "Другое",
];

pub const BULK_REJECT_REASON: &str = "Другое";
pub const BULK_REJECT_COMMENT: &str = "Массовое отклонение";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject(Verdict),
    RequestChanges(Verdict),
}

impl ModerationAction {
    /// The single verdict applied to every item of a bulk rejection.
    pub fn bulk_reject() -> Self {
        ModerationAction::Reject(Verdict::new(
            BULK_REJECT_REASON,
            Some(BULK_REJECT_COMMENT.to_string()),
        ))
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            ModerationAction::Approve => None,
            ModerationAction::Reject(verdict) | ModerationAction::RequestChanges(verdict) => {
                Some(verdict)
            }
        }
    }

    /// Path segment of the backend endpoint for this action.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject(_) => "reject",
            ModerationAction::RequestChanges(_) => "request-changes",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::{AdStatus, ModerationAction, Verdict, BULK_REJECT_REASON};

    #[test]
    fn status_parse_accepts_only_known_names() {
        assert_eq!(AdStatus::parse("draft"), Some(AdStatus::Draft));
        assert_eq!(AdStatus::parse("Draft"), None);
        assert_eq!(AdStatus::parse("archived"), None);
    }

    #[test]
    fn blank_comment_is_dropped() {
        let verdict = Verdict::new("Другое", Some("   ".to_string()));
        assert_eq!(verdict.comment, None);
    }

    #[test]
    fn bulk_reject_uses_uniform_reason() {
        let action = ModerationAction::bulk_reject();
        assert_eq!(action.endpoint(), "reject");
        assert_eq!(action.verdict().map(|v| v.reason.as_str()), Some(BULK_REJECT_REASON));
    }
}
