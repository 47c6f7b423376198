//! Frozen per-user split of a cost.
//!
//! Rows are written once, together with their cost, and never updated.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cost_attributions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cost_id: String,
    pub asset_id: String,
    pub user_id: String,
    pub attributed_amount_minor: i64,
    pub percentage: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::costs::Entity",
        from = "Column::CostId",
        to = "super::costs::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Costs,
}

impl Related<super::costs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Costs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
