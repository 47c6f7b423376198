//! Per-asset ownership shares.
//!
//! There is at most one row per `(asset_id, user_id)`: leaving an asset flips
//! `is_active` and rejoining reuses the same row.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// A fractional claim of a user on an asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    pub asset_id: Uuid,
    pub user_id: String,
    pub share_percentage: f64,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

impl Partnership {
    pub fn new(asset_id: Uuid, user_id: &str, share_percentage: f64) -> Self {
        Self {
            asset_id,
            user_id: user_id.to_string(),
            share_percentage,
            is_active: true,
            joined_at: Utc::now(),
            left_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asset_partnerships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub asset_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub share_percentage: f64,
    pub is_active: bool,
    pub joined_at: DateTimeUtc,
    pub left_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Assets,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Partnership> for ActiveModel {
    fn from(value: &Partnership) -> Self {
        Self {
            asset_id: ActiveValue::Set(value.asset_id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            share_percentage: ActiveValue::Set(value.share_percentage),
            is_active: ActiveValue::Set(value.is_active),
            joined_at: ActiveValue::Set(value.joined_at),
            left_at: ActiveValue::Set(value.left_at),
        }
    }
}

impl TryFrom<Model> for Partnership {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            asset_id: parse_uuid(&model.asset_id, "asset")?,
            user_id: model.user_id,
            share_percentage: model.share_percentage,
            is_active: model.is_active,
            joined_at: model.joined_at,
            left_at: model.left_at,
        })
    }
}
