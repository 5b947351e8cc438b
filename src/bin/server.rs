//! TMS HTTP Server Binary
//!
//! This is the main entry point for the TMS availability REST API server.
//! It initializes the repository, sets up the HTTP router, and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin tms-server
//!
//! # Run with demo data for manual testing
//! TMS_SEED_DEMO=1 cargo run --bin tms-server
//! ```
//!
//! # Configuration
//!
//! Settings are read from `tms.toml` when present; environment variables
//! override the bind address:
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend when no config file exists
//! - `TMS_SEED_DEMO`: Seed demo data into the in-memory repository
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tms_rust::api::{
    BranchId, ClassId, HolidayId, RoomId, ScheduleRowId, StudentId, SubjectId, TeacherId,
};
use tms_rust::db::{
    repository::FullRepository, LocalRepository, RepositoryConfig, RepositoryFactory,
    RepositoryType,
};
use tms_rust::http::{create_router, AppState};
use tms_rust::models::{
    Branch, Class, ClassScheduleRow, ClassStatus, Holiday, HolidayType, Room, ScheduleRowStatus,
    Student, Subject, Teacher,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting TMS HTTP Server");

    // Configuration file is optional; environment variables fill the gaps.
    let config = match RepositoryConfig::from_default_location() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("No configuration file loaded ({}), using defaults", e);
            None
        }
    };

    let repo_type = config
        .as_ref()
        .and_then(|c| c.repository_type().ok())
        .unwrap_or_else(RepositoryType::from_env);

    let repository: Arc<dyn FullRepository> =
        if repo_type == RepositoryType::Local && env::var("TMS_SEED_DEMO").is_ok() {
            let repo = LocalRepository::new();
            seed_demo_data(&repo);
            info!("Seeded demo data into the in-memory repository");
            Arc::new(repo)
        } else {
            RepositoryFactory::create(repo_type).map_err(|e| anyhow::anyhow!(e))?
        };
    info!("Repository initialized successfully");

    // Create application state and router
    let state = AppState::new(repository);
    let app = create_router(state);

    // Determine bind address: environment overrides the config file.
    let server = config.map(|c| c.server).unwrap_or_default();
    let host = env::var("HOST").unwrap_or(server.host);
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed a small branch with one class and its reference data so the API can
/// be exercised without an external data source.
fn seed_demo_data(repo: &LocalRepository) {
    repo.insert_branch(Branch {
        id: BranchId::new(1),
        name: "Downtown".to_string(),
    });
    repo.insert_room(Room {
        id: RoomId::new(101),
        branch_id: BranchId::new(1),
        name: "Room 101".to_string(),
        capacity: Some(12),
    });
    repo.insert_teacher(Teacher {
        id: TeacherId::new(1),
        name: "Alice Wong".to_string(),
    });
    repo.insert_subject(Subject {
        id: SubjectId::new(1),
        name: "Math".to_string(),
    });
    repo.insert_student(Student {
        id: StudentId::new(1),
        name: "Ben Carter".to_string(),
    });

    let start_date = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
    repo.insert_class(Class {
        id: ClassId::new(1),
        name: "Math A1".to_string(),
        subject_id: SubjectId::new(1),
        branch_id: BranchId::new(1),
        room_id: RoomId::new(101),
        teacher_id: TeacherId::new(1),
        days_of_week: vec![Weekday::Mon],
        start_time: "10:00".parse().unwrap(),
        end_time: "11:00".parse().unwrap(),
        start_date,
        end_date: NaiveDate::from_ymd_opt(2026, 12, 21).unwrap(),
        status: ClassStatus::Published,
        total_sessions: 16,
    });
    for week in 0..16 {
        repo.insert_schedule_row(ClassScheduleRow {
            id: ScheduleRowId::new(week + 1),
            class_id: ClassId::new(1),
            date: start_date + chrono::Duration::weeks(week),
            session_number: (week + 1) as u32,
            status: ScheduleRowStatus::Scheduled,
        });
    }

    repo.insert_holiday(Holiday {
        id: HolidayId::new(1),
        name: "Founders Day".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
        holiday_type: HolidayType::National,
        branches: vec![],
    });
}
