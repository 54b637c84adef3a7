use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Not unique; one route uses it as an exact-match lookup key.
    pub title: String,

    pub year: i32,

    pub description: Option<String>,

    pub metascore: Option<i32>,

    /// List ordering key when present.
    pub rank: Option<i32>,

    /// The only field mutated after creation.
    pub seen: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
