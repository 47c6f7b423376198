//! The module contains the `Asset` struct and its storage model.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// An ownable financial entity (an account, a property, ...).
///
/// An asset always has exactly one primary owner. Other users only hold
/// fractional claims on it through partnerships.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub value_minor: Option<i64>,
    pub company_id: Uuid,
    pub bank_id: Option<Uuid>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn new(
        name: String,
        kind: String,
        value_minor: Option<i64>,
        company_id: Uuid,
        bank_id: Option<Uuid>,
        owner_id: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            value_minor,
            company_id,
            bank_id,
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub kind: String,
    pub value_minor: Option<i64>,
    pub company_id: String,
    pub bank_id: Option<String>,
    pub owner_id: String,
    pub created_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Companies,
    #[sea_orm(
        belongs_to = "super::banks::Entity",
        from = "Column::BankId",
        to = "super::banks::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Banks,
    #[sea_orm(has_many = "super::asset_partnerships::Entity")]
    Partnerships,
    #[sea_orm(has_many = "super::partnership_invitations::Entity")]
    Invitations,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::banks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Banks.def()
    }
}

impl Related<super::asset_partnerships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partnerships.def()
    }
}

impl Related<super::partnership_invitations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invitations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Asset> for ActiveModel {
    fn from(value: &Asset) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            kind: ActiveValue::Set(value.kind.clone()),
            value_minor: ActiveValue::Set(value.value_minor),
            company_id: ActiveValue::Set(value.company_id.to_string()),
            bank_id: ActiveValue::Set(value.bank_id.map(|id| id.to_string())),
            owner_id: ActiveValue::Set(value.owner_id.clone()),
            created_at: ActiveValue::Set(value.created_at),
            deleted_at: ActiveValue::Set(value.deleted_at),
        }
    }
}

impl TryFrom<Model> for Asset {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "asset")?,
            name: model.name,
            kind: model.kind,
            value_minor: model.value_minor,
            company_id: parse_uuid(&model.company_id, "company")?,
            bank_id: model
                .bank_id
                .as_deref()
                .map(|id| parse_uuid(id, "bank"))
                .transpose()?,
            owner_id: model.owner_id,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        })
    }
}
