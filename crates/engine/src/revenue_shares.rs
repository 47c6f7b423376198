//! Frozen per-user split of a revenue.
//!
//! Rows are written once, together with their revenue, and never updated.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "revenue_shares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub revenue_id: String,
    pub asset_id: String,
    pub user_id: String,
    pub share_amount_minor: i64,
    pub percentage: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::revenues::Entity",
        from = "Column::RevenueId",
        to = "super::revenues::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Revenues,
}

impl Related<super::revenues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Revenues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
