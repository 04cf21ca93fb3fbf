//! Staff repository for database operations.
//!
//! Bank accounts are keyed one-per-profile; the upsert makes repeated
//! submissions of the payout form converge on a single row.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::staff_bank_accounts;

/// Input for a bank account upsert.
#[derive(Debug, Clone)]
pub struct BankAccountInput {
    /// Name on the account.
    pub account_holder: String,
    /// Account number.
    pub account_number: String,
    /// IFSC routing code.
    pub ifsc_code: String,
    /// Bank name.
    pub bank_name: String,
    /// Branch, if known.
    pub branch: Option<String>,
}

/// Staff repository for payout details.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    db: DatabaseConnection,
}

impl StaffRepository {
    /// Creates a new staff repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts the bank account for a staff profile.
    ///
    /// Idempotent on `profile_id`: repeated calls update the stored
    /// details rather than inserting duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub async fn upsert_bank_account(
        &self,
        profile_id: Uuid,
        input: &BankAccountInput,
    ) -> Result<staff_bank_accounts::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let account = staff_bank_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            profile_id: Set(profile_id),
            account_holder: Set(input.account_holder.clone()),
            account_number: Set(input.account_number.clone()),
            ifsc_code: Set(input.ifsc_code.clone()),
            bank_name: Set(input.bank_name.clone()),
            branch: Set(input.branch.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        staff_bank_accounts::Entity::insert(account)
            .on_conflict(
                OnConflict::column(staff_bank_accounts::Column::ProfileId)
                    .update_columns([
                        staff_bank_accounts::Column::AccountHolder,
                        staff_bank_accounts::Column::AccountNumber,
                        staff_bank_accounts::Column::IfscCode,
                        staff_bank_accounts::Column::BankName,
                        staff_bank_accounts::Column::Branch,
                        staff_bank_accounts::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }

    /// Finds the bank account for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_bank_account(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<staff_bank_accounts::Model>, DbErr> {
        staff_bank_accounts::Entity::find()
            .filter(staff_bank_accounts::Column::ProfileId.eq(profile_id))
            .one(&self.db)
            .await
    }

    /// Deletes the bank account for a profile. Returns true if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_bank_account(&self, profile_id: Uuid) -> Result<bool, DbErr> {
        let result = staff_bank_accounts::Entity::delete_many()
            .filter(staff_bank_accounts::Column::ProfileId.eq(profile_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
