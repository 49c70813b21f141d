//! Lead database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Lead;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub object_type: Option<String>,
    pub object_type_other: Option<String>,
    pub area: Option<String>,
    pub rooms: Option<String>,
    pub services: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub deadline: Option<String>,
    pub budget: Option<String>,
    pub materials_interest: Option<String>,
    pub consultation_type: Option<String>,
    /// Filled by the column default on insert
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Lead {
    fn from(model: Model) -> Self {
        Lead {
            id: model.id,
            name: model.name,
            phone: model.phone,
            city: model.city,
            address: model.address,
            object_type: model.object_type,
            object_type_other: model.object_type_other,
            area: model.area,
            rooms: model.rooms,
            services: model.services,
            start_time: model.start_time,
            deadline: model.deadline,
            budget: model.budget,
            materials_interest: model.materials_interest,
            consultation_type: model.consultation_type,
            created_at: model.created_at,
        }
    }
}
