//! SeaORM entities for database tables
//!
//! Enum-valued columns are stored as their wire strings; conversions to the
//! contract enums live in mapper.rs. History tables carry the same field
//! set as their parent plus a back-reference, and are append-only.

/// Employee directory
pub mod employee {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "employee")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Unique username used for all ownership checks
        #[sea_orm(unique)]
        pub username: String,

        pub first_name: String,
        pub last_name: String,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Organizations that own tenders
pub mod organization {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "organization")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub name: String,
        pub description: String,

        /// IE | LLC | JSC
        pub organization_type: String,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::organization_responsible::Entity")]
        Responsible,
    }

    impl Related<super::organization_responsible::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Responsible.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Responsibility grants: employee may act for organization
pub mod organization_responsible {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "organization_responsible")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub organization_id: Uuid,
        pub employee_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::organization::Entity",
            from = "Column::OrganizationId",
            to = "super::organization::Column::Id"
        )]
        Organization,
        #[sea_orm(
            belongs_to = "super::employee::Entity",
            from = "Column::EmployeeId",
            to = "super::employee::Column::Id"
        )]
        Employee,
    }

    impl Related<super::organization::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Organization.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Current tender rows
pub mod tender {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "tenders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub name: String,
        pub description: String,

        /// Construction | Delivery | Manufacture
        pub service_type: String,

        /// Created | Published | Closed
        pub status: String,

        pub organization_id: Uuid,
        pub creator_username: String,

        /// Strictly increasing, starts at 1
        pub version: i32,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::tender_history::Entity")]
        History,
        #[sea_orm(has_many = "super::bid::Entity")]
        Bids,
    }

    impl Related<super::tender_history::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::History.def()
        }
    }

    impl Related<super::bid::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Bids.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Immutable tender snapshots, one row per version transition
pub mod tender_history {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "tender_histories")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub tender_id: Uuid,
        pub name: String,
        pub description: String,
        pub service_type: String,
        pub status: String,
        pub organization_id: Uuid,
        pub creator_username: String,

        /// Version the parent row held when this snapshot was taken
        pub version: i32,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::tender::Entity",
            from = "Column::TenderId",
            to = "super::tender::Column::Id"
        )]
        Tender,
    }

    impl Related<super::tender::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Tender.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Current bid rows
pub mod bid {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "bids")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub name: String,
        pub description: String,

        /// Created | Published | Canceled
        pub status: String,

        pub tender_id: Uuid,

        /// User | Organization
        pub author_type: String,

        pub author_id: Uuid,

        /// Strictly increasing, starts at 1
        pub version: i32,

        pub created_at: DateTimeUtc,

        /// Approved | Rejected, decoupled from status
        pub decision: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::tender::Entity",
            from = "Column::TenderId",
            to = "super::tender::Column::Id"
        )]
        Tender,
        #[sea_orm(has_many = "super::bid_history::Entity")]
        History,
        #[sea_orm(has_many = "super::bid_feedback::Entity")]
        Feedback,
    }

    impl Related<super::tender::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Tender.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Immutable bid snapshots, one row per version transition
pub mod bid_history {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "bid_histories")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub bid_id: Uuid,
        pub name: String,
        pub description: String,
        pub status: String,
        pub tender_id: Uuid,
        pub author_type: String,
        pub author_id: Uuid,

        /// Version the parent row held when this snapshot was taken
        pub version: i32,

        pub created_at: DateTimeUtc,
        pub decision: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::bid::Entity",
            from = "Column::BidId",
            to = "super::bid::Column::Id"
        )]
        Bid,
    }

    impl Related<super::bid::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Bid.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Append-only bid feedback
pub mod bid_feedback {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "bid_feedbacks")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub bid_id: Uuid,

        /// At most 1000 characters, validated upstream
        pub feedback: String,

        pub author_id: Uuid,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::bid::Entity",
            from = "Column::BidId",
            to = "super::bid::Column::Id"
        )]
        Bid,
    }

    impl Related<super::bid::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Bid.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
