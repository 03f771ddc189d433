use axum::Router;
use backoffice_query::filtering::{
    EqualityFilter, FilterConfig, FilterField, FilterOperator, SortOrder,
};
use backoffice_query::{ListResource, list_router};
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement,
};
use sea_orm_migration::prelude::*;
use serde::{Deserialize, Serialize};

pub const PARTICIPANT_COUNT: i32 = 25;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    // Degraded-input debug events show up under `cargo test -- --nocapture`
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;
    seed(&db).await?;

    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let api = Router::new()
        .merge(list_router::<Participants>("/participants"))
        .merge(list_router::<BrokenResource>("/broken"))
        .with_state(db);

    Router::new().nest("/api/v1", api)
}

/// Three domains and 25 participants.
///
/// Participant `i` lives in domain `(i % 3) + 1`, scores `i * 4` and is an
/// admin when `i` is a multiple of 5. Participants 1 and 2 have distinctive
/// names for search tests; the rest are "Participant NN".
async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(
        "INSERT INTO domains (id, name) VALUES (1, 'Sales'), (2, 'Support'), (3, 'Engineering')",
    )
    .await?;

    for i in 1..=PARTICIPANT_COUNT {
        let (name, email) = match i {
            1 => ("Alice Martin".to_string(), "alice.martin@example.com".to_string()),
            2 => ("Bob Stone".to_string(), "bob@alicorp.io".to_string()),
            _ => (format!("Participant {i:02}"), format!("participant{i:02}@example.com")),
        };
        let role = if i % 5 == 0 { "admin" } else { "member" };
        let sql = format!(
            "INSERT INTO participants (id, domain_id, name, email, role, score) \
             VALUES ({i}, {}, '{name}', '{email}', '{role}', {})",
            (i % 3) + 1,
            i * 4
        );
        db.execute_unprepared(&sql).await?;
    }

    Ok(())
}

/// Insert one extra participant with bound values, so names may hold quotes
/// or LIKE wildcards.
pub async fn insert_participant(
    db: &DatabaseConnection,
    id: i32,
    domain_id: i32,
    name: &str,
    email: &str,
) -> Result<(), DbErr> {
    let values: [sea_orm::Value; 4] = [id.into(), domain_id.into(), name.into(), email.into()];
    db.execute(Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "INSERT INTO participants (id, domain_id, name, email, role, score) \
         VALUES (?, ?, ?, ?, 'member', 0)",
        values,
    ))
    .await?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub id: i32,
    pub domain_id: i32,
    pub domain_name: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub score: i32,
}

pub struct Participants;

impl ListResource for Participants {
    type Row = ParticipantRow;

    const RESOURCE_NAME_PLURAL: &'static str = "participants";
    const SELECT_SQL: &'static str = "SELECT p.id, p.domain_id, d.name AS domain_name, p.name, \
         p.email, p.role, p.score FROM participants p JOIN domains d ON d.id = p.domain_id";
    const COUNT_SQL: &'static str =
        "SELECT COUNT(*) FROM participants p JOIN domains d ON d.id = p.domain_id";

    fn simple_filters() -> Vec<EqualityFilter> {
        vec![
            EqualityFilter::integer("domain_id", "p.domain_id"),
            EqualityFilter::text("role", "p.role"),
        ]
    }

    fn search_columns() -> Vec<&'static str> {
        vec!["p.name", "p.email"]
    }

    fn filter_config() -> FilterConfig {
        FilterConfig::new()
            .field("name", FilterField::new("p.name"))
            .field("role", FilterField::new("p.role"))
            .field("domain_name", FilterField::new("d.name"))
            .field("score", FilterField::new("p.score"))
            .field("score_min", FilterField::new("p.score").operator(FilterOperator::Gte))
            .field("score_max", FilterField::new("p.score").operator(FilterOperator::Lte))
    }

    fn sortable_columns() -> Vec<(&'static str, &'static str)> {
        vec![
            ("id", "p.id"),
            ("name", "p.name"),
            ("score", "p.score"),
            ("domain", "d.name"),
        ]
    }

    fn default_sort_field() -> &'static str {
        "id"
    }

    fn default_sort_order() -> SortOrder {
        SortOrder::Desc
    }
}

/// Points at a table that does not exist, to exercise database failures.
pub struct BrokenResource;

impl ListResource for BrokenResource {
    type Row = ParticipantRow;

    const RESOURCE_NAME_PLURAL: &'static str = "broken";
    const SELECT_SQL: &'static str = "SELECT * FROM missing_table m";
    const COUNT_SQL: &'static str = "SELECT COUNT(*) FROM missing_table m";

    fn sortable_columns() -> Vec<(&'static str, &'static str)> {
        vec![("id", "m.id")]
    }

    fn default_sort_field() -> &'static str {
        "id"
    }
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateDomainTable), Box::new(CreateParticipantTable)]
    }
}

pub struct CreateDomainTable;

#[async_trait::async_trait]
impl MigrationName for CreateDomainTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_domain_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateDomainTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(DomainEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(DomainColumn::Id)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(DomainColumn::Name).string().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DomainEntity).to_owned())
            .await?;
        Ok(())
    }
}

pub struct CreateParticipantTable;

#[async_trait::async_trait]
impl MigrationName for CreateParticipantTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_participant_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateParticipantTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ParticipantEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(ParticipantColumn::Id)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(ParticipantColumn::DomainId).integer().not_null())
            .col(ColumnDef::new(ParticipantColumn::Name).string().not_null())
            .col(ColumnDef::new(ParticipantColumn::Email).string().not_null())
            .col(ColumnDef::new(ParticipantColumn::Role).string().not_null())
            .col(
                ColumnDef::new(ParticipantColumn::Score)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParticipantEntity).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum DomainColumn {
    Id,
    Name,
}

impl Iden for DomainColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct DomainEntity;

impl Iden for DomainEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "domains").unwrap();
    }
}

#[derive(Debug)]
pub enum ParticipantColumn {
    Id,
    DomainId,
    Name,
    Email,
    Role,
    Score,
}

impl Iden for ParticipantColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::DomainId => "domain_id",
                Self::Name => "name",
                Self::Email => "email",
                Self::Role => "role",
                Self::Score => "score",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct ParticipantEntity;

impl Iden for ParticipantEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "participants").unwrap();
    }
}
