use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use otpgate_auth_schema::{otps, sms_outbox, tasks, users};
use otpgate_domain::user::{Gender, UserStatus};

use crate::domain::repository::{OtpRepository, TaskRepository, UserRepository};
use crate::domain::types::{OtpRecord, ProfileChanges, SmsDispatch, Task, User};
use crate::error::AuthServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_mobile(
        &self,
        mobile_number: &str,
        country_code: i32,
    ) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::MobileNumber.eq(mobile_number))
            .filter(users::Column::CountryCode.eq(country_code))
            .one(&self.db)
            .await
            .context("find user by mobile number")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn create(&self, user: &User) -> Result<(), AuthServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            mobile_number: Set(user.mobile_number.clone()),
            country_code: Set(user.country_code),
            time_zone: Set(user.time_zone.clone()),
            gender: Set(user.gender.map(|g| g.as_str().to_owned())),
            user_type: Set(user.user_type.clone()),
            user_status: Set(user.user_status.map(|s| s.as_str().to_owned())),
            facebook: Set(user.facebook.clone()),
            linkedin: Set(user.linkedin.clone()),
            instagram: Set(user.instagram.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AuthServiceError::UserAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<u64, AuthServiceError> {
        let mut update = users::Entity::update_many().filter(users::Column::Id.eq(id));
        if let Some(ref first_name) = changes.first_name {
            update = update.col_expr(users::Column::FirstName, Expr::value(first_name.clone()));
        }
        if let Some(ref email) = changes.email {
            update = update.col_expr(users::Column::Email, Expr::value(email.clone()));
        }
        if let Some(gender) = changes.gender {
            update = update.col_expr(users::Column::Gender, Expr::value(gender.as_str()));
        }
        if let Some(ref facebook) = changes.facebook {
            update = update.col_expr(users::Column::Facebook, Expr::value(facebook.clone()));
        }
        if let Some(ref linkedin) = changes.linkedin {
            update = update.col_expr(users::Column::Linkedin, Expr::value(linkedin.clone()));
        }
        if let Some(ref instagram) = changes.instagram {
            update = update.col_expr(users::Column::Instagram, Expr::value(instagram.clone()));
        }
        let result = update
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("update user profile")?;
        Ok(result.rows_affected)
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let gender = model
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()
        .context("stored gender")?;
    let user_status = model
        .user_status
        .as_deref()
        .map(str::parse::<UserStatus>)
        .transpose()
        .context("stored user_status")?;
    Ok(User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        mobile_number: model.mobile_number,
        country_code: model.country_code,
        time_zone: model.time_zone,
        gender,
        user_type: model.user_type,
        user_status,
        facebook: model.facebook,
        linkedin: model.linkedin,
        instagram: model.instagram,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn create_with_dispatch(
        &self,
        otp: &OtpRecord,
        sms: &SmsDispatch,
    ) -> Result<(), AuthServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let otp = otp.clone();
                let sms = sms.clone();
                Box::pin(async move {
                    insert_otp(txn, &otp).await?;
                    queue_sms(txn, &sms).await?;
                    Ok(())
                })
            })
            .await
            .context("create otp with sms dispatch")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, AuthServiceError> {
        let model = otps::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find otp by id")?;
        Ok(model.map(otp_from_model))
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, AuthServiceError> {
        // Conditional on verified = false: the row count says who won a concurrent race.
        let result = otps::Entity::update_many()
            .col_expr(otps::Column::Verified, Expr::value(true))
            .filter(otps::Column::Id.eq(id))
            .filter(otps::Column::Verified.eq(false))
            .exec(&self.db)
            .await
            .context("mark otp verified")?;
        Ok(result.rows_affected == 1)
    }

    async fn expire_outstanding(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, AuthServiceError> {
        let result = otps::Entity::update_many()
            .col_expr(otps::Column::ExpirationTime, Expr::value(now))
            .filter(otps::Column::UserId.eq(user_id))
            .filter(otps::Column::Verified.eq(false))
            .filter(otps::Column::ExpirationTime.gt(now))
            .exec(&self.db)
            .await
            .context("expire outstanding otps")?;
        Ok(result.rows_affected)
    }
}

async fn insert_otp(txn: &DatabaseTransaction, otp: &OtpRecord) -> Result<(), sea_orm::DbErr> {
    otps::ActiveModel {
        id: Set(otp.id),
        user_id: Set(otp.user_id),
        otp: Set(otp.otp.clone()),
        expiration_time: Set(otp.expiration_time),
        verified: Set(otp.verified),
        created_at: Set(otp.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn queue_sms(txn: &DatabaseTransaction, sms: &SmsDispatch) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    sms_outbox::ActiveModel {
        id: Set(sms.id),
        otp_id: Set(sms.otp_id),
        payload: Set(sms.payload.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        sent_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn otp_from_model(model: otps::Model) -> OtpRecord {
    OtpRecord {
        id: model.id,
        user_id: model.user_id,
        otp: model.otp,
        expiration_time: model.expiration_time,
        verified: model.verified,
        created_at: model.created_at,
    }
}

// ── Task repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaskRepository {
    pub db: DatabaseConnection,
}

impl TaskRepository for DbTaskRepository {
    async fn create(&self, task: &Task) -> Result<(), AuthServiceError> {
        tasks::ActiveModel {
            id: Set(task.id),
            title: Set(task.title.clone()),
            priority: Set(task.priority.clone()),
            date: Set(task.date),
            description: Set(task.description.clone()),
            created_by: Set(task.created_by.clone()),
            created_at: Set(task.created_at),
        }
        .insert(&self.db)
        .await
        .context("create task")?;
        Ok(())
    }

    async fn list_by_creator(&self, created_by: &str) -> Result<Vec<Task>, AuthServiceError> {
        let models = tasks::Entity::find()
            .filter(tasks::Column::CreatedBy.eq(created_by))
            .order_by_desc(tasks::Column::Date)
            .all(&self.db)
            .await
            .context("list tasks by creator")?;
        Ok(models.into_iter().map(task_from_model).collect())
    }
}

fn task_from_model(model: tasks::Model) -> Task {
    Task {
        id: model.id,
        title: model.title,
        priority: model.priority,
        date: model.date,
        description: model.description,
        created_by: model.created_by,
        created_at: model.created_at,
    }
}
