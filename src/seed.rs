//! One-time startup seeding: department logins and demo hospitals.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::auth::{accounts::DEPARTMENT_ACCOUNTS, password::hash_password};
use crate::entities::{department_account, hospital, DepartmentAccounts, Hospitals};
use crate::error::AppError;
use crate::healthcare::HospitalStatus;

#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    pub department_password: Option<String>,
    pub demo_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub accounts_created: usize,
    pub hospitals_created: usize,
}

/// Guards seeding so it runs at most once per process, however many callers
/// race to trigger it.
#[derive(Debug, Default)]
pub struct Seeder {
    done: OnceCell<SeedReport>,
    options: SeedOptions,
}

impl Seeder {
    pub fn new(options: SeedOptions) -> Self {
        Self {
            done: OnceCell::new(),
            options,
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.done.initialized()
    }

    pub async fn ensure_seeded(&self, db: &DatabaseConnection) -> Result<SeedReport, AppError> {
        self.done
            .get_or_try_init(|| async {
                let report = SeedReport {
                    accounts_created: seed_department_accounts(db, &self.options).await?,
                    hospitals_created: seed_demo_hospitals(db, &self.options).await?,
                };
                info!(
                    "Seeding complete: accounts_created={}, hospitals_created={}",
                    report.accounts_created, report.hospitals_created
                );
                Ok::<_, AppError>(report)
            })
            .await
            .copied()
    }
}

async fn seed_department_accounts(db: &DatabaseConnection, options: &SeedOptions) -> Result<usize, AppError> {
    let Some(password) = options.department_password.as_deref() else {
        warn!("DEPARTMENT_SEED_PASSWORD not set; department accounts will not be seeded");
        return Ok(0);
    };

    let mut created = 0;
    for account in DEPARTMENT_ACCOUNTS {
        let exists = DepartmentAccounts::find()
            .filter(department_account::Column::Email.eq(account.email))
            .count(db)
            .await?
            > 0;
        if exists {
            continue;
        }

        department_account::ActiveModel {
            email: Set(account.email.to_string()),
            password_hash: Set(hash_password(password)?),
            name: Set(account.name.to_string()),
            role: Set(account.role.as_str().to_string()),
            department: Set(account.department.to_string()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        created += 1;
    }
    Ok(created)
}

struct DemoHospital {
    name: &'static str,
    address: &'static str,
    lat: f64,
    lng: f64,
    contact: &'static str,
    total_beds: i32,
    available_beds: i32,
    emergency_capacity: i32,
    icu_capacity: i32,
}

const DEMO_HOSPITALS: [DemoHospital; 4] = [
    DemoHospital {
        name: "Philippine General Hospital",
        address: "Taft Avenue, Ermita, Manila",
        lat: 14.5776,
        lng: 120.9856,
        contact: "(02) 8554-8400",
        total_beds: 1500,
        available_beds: 120,
        emergency_capacity: 80,
        icu_capacity: 40,
    },
    DemoHospital {
        name: "East Avenue Medical Center",
        address: "East Avenue, Diliman, Quezon City",
        lat: 14.6438,
        lng: 121.0463,
        contact: "(02) 8928-0611",
        total_beds: 600,
        available_beds: 45,
        emergency_capacity: 50,
        icu_capacity: 24,
    },
    DemoHospital {
        name: "Amang Rodriguez Memorial Medical Center",
        address: "Sumulong Highway, Marikina",
        lat: 14.6327,
        lng: 121.0917,
        contact: "(02) 8948-0301",
        total_beds: 300,
        available_beds: 60,
        emergency_capacity: 30,
        icu_capacity: 12,
    },
    DemoHospital {
        name: "Ospital ng Makati",
        address: "Sampaguita Street, Pembo, Makati",
        lat: 14.5480,
        lng: 121.0590,
        contact: "(02) 8882-6316",
        total_beds: 300,
        available_beds: 30,
        emergency_capacity: 25,
        icu_capacity: 10,
    },
];

async fn seed_demo_hospitals(db: &DatabaseConnection, options: &SeedOptions) -> Result<usize, AppError> {
    if !options.demo_data || Hospitals::find().count(db).await? > 0 {
        return Ok(0);
    }

    let now = Utc::now().naive_utc();
    for demo in &DEMO_HOSPITALS {
        hospital::ActiveModel {
            name: Set(demo.name.to_string()),
            address: Set(demo.address.to_string()),
            latitude: Set(demo.lat),
            longitude: Set(demo.lng),
            contact: Set(demo.contact.to_string()),
            total_beds: Set(demo.total_beds),
            available_beds: Set(demo.available_beds),
            emergency_capacity: Set(demo.emergency_capacity),
            icu_capacity: Set(demo.icu_capacity),
            status: Set(HospitalStatus::Operational.as_str().to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(DEMO_HOSPITALS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::healthcare::Capacity;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn nothing_to_seed_touches_no_tables() {
        let seeder = Seeder::new(SeedOptions {
            department_password: None,
            demo_data: false,
        });
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let report = seeder.ensure_seeded(&db).await.unwrap();

        assert_eq!(report, SeedReport::default());
        assert!(seeder.is_seeded());
    }

    fn count_row(n: i64) -> Vec<BTreeMap<&'static str, Value>> {
        vec![BTreeMap::from([("num_items", Value::BigInt(Some(n)))])]
    }

    #[tokio::test]
    async fn failed_seed_can_be_retried() {
        let seeder = Seeder::new(SeedOptions {
            department_password: Some("pw".into()),
            demo_data: false,
        });
        // First attempt fails on its first lookup; the retry finds every
        // account already present.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .append_query_results([count_row(1), count_row(1), count_row(1), count_row(1)])
            .into_connection();

        assert!(seeder.ensure_seeded(&db).await.is_err());
        assert!(!seeder.is_seeded());

        let report = seeder.ensure_seeded(&db).await.unwrap();
        assert_eq!(report, SeedReport::default());
        assert!(seeder.is_seeded());
    }

    #[test]
    fn demo_hospitals_satisfy_capacity_rules() {
        for demo in &DEMO_HOSPITALS {
            Capacity {
                total_beds: demo.total_beds,
                available_beds: demo.available_beds,
                emergency_capacity: demo.emergency_capacity,
                icu_capacity: demo.icu_capacity,
            }
            .validate()
            .unwrap();
        }
    }
}
