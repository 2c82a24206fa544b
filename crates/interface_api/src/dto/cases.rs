//! Case DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ActorRole, AttachmentId, CaseId, Currency, Money, PartyId, TimelineEventId};
use domain_case::{AttachmentInfo, Case, CaseType};
use domain_engagement::{TimelineAction, TimelineEvent};

#[derive(Debug, Deserialize, Serialize)]
pub struct BudgetDto {
    pub amount: Decimal,
    pub currency: Currency,
}

impl From<Money> for BudgetDto {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount(),
            currency: money.currency(),
        }
    }
}

impl From<BudgetDto> for Money {
    fn from(dto: BudgetDto) -> Self {
        Money::new(dto.amount, dto.currency)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct OpenCaseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub case_type: CaseType,
    #[validate(length(min = 1, max = 100))]
    pub client_role: String,
    pub budget: Option<BudgetDto>,
    #[serde(default)]
    pub attachments: Vec<AttachmentId>,
}

/// An attachment as shown on a case; unresolved ids degrade to id-only
#[derive(Debug, Serialize)]
pub struct AttachmentView {
    pub id: AttachmentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AttachmentView {
    pub fn resolved(info: AttachmentInfo) -> Self {
        Self {
            id: info.id,
            name: Some(info.name),
            size_bytes: Some(info.size_bytes),
            mime_type: Some(info.mime_type),
            url: Some(info.url),
        }
    }

    pub fn unresolved(id: AttachmentId) -> Self {
        Self {
            id,
            name: None,
            size_bytes: None,
            mime_type: None,
            url: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaseResponse {
    pub id: CaseId,
    pub owner_id: PartyId,
    pub title: String,
    pub case_type: CaseType,
    pub client_role: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetDto>,
    pub attachments: Vec<AttachmentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseResponse {
    pub fn from_case(case: Case, attachments: Vec<AttachmentView>) -> Self {
        Self {
            id: case.id,
            owner_id: case.owner_id,
            title: case.title,
            case_type: case.case_type,
            client_role: case.client_role,
            status: case.status.as_str().to_string(),
            budget: case.budget.map(BudgetDto::from),
            attachments,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineEventResponse {
    pub id: TimelineEventId,
    pub case_id: CaseId,
    pub action: TimelineAction,
    pub actor_id: PartyId,
    pub actor_role: ActorRole,
    pub timestamp: DateTime<Utc>,
}

impl From<TimelineEvent> for TimelineEventResponse {
    fn from(event: TimelineEvent) -> Self {
        Self {
            id: event.id,
            case_id: event.case_id,
            action: event.action,
            actor_id: event.actor_id,
            actor_role: event.actor_role,
            timestamp: event.timestamp,
        }
    }
}
