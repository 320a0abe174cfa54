use crate::{
    error::{AppError, AppResult},
    models::{user, User, UserModel},
    utils::{encode_token, hash_password, verify_password},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new user with the default CUSTOMER role.
    /// Returns (user_model, token).
    pub async fn register(&self, input: RegisterInput) -> AppResult<(UserModel, String)> {
        if self.email_exists(&input.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let now = chrono::Utc::now().naive_utc();

        let new_user = user::ActiveModel {
            email: sea_orm::ActiveValue::Set(input.email),
            password_hash: sea_orm::ActiveValue::Set(password_hash),
            name: sea_orm::ActiveValue::Set(input.name),
            phone_number: sea_orm::ActiveValue::Set(input.phone_number),
            address: sea_orm::ActiveValue::Set(input.address),
            avatar_url: sea_orm::ActiveValue::Set(None),
            is_active: sea_orm::ActiveValue::Set(true),
            role: sea_orm::ActiveValue::Set(user::ROLE_CUSTOMER.to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            last_login_at: sea_orm::ActiveValue::Set(None),
            ..Default::default()
        };

        let user = new_user.insert(&self.db).await?;
        let token = encode_token(user.id, &user.email, &user.role)?;

        Ok((user, token))
    }

    /// Login with email and password.
    ///
    /// Unknown email, wrong password and deactivated accounts all fail
    /// with the same Unauthorized error. On success the last-login time
    /// is stamped before the token is issued.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(UserModel, String)> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let is_valid = verify_password(password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized);
        }

        if !user.is_active {
            return Err(AppError::Unauthorized);
        }

        let now = chrono::Utc::now().naive_utc();
        let mut active: user::ActiveModel = user.into();
        active.last_login_at = sea_orm::ActiveValue::Set(Some(now));
        let user = active.update(&self.db).await?;

        let token = encode_token(user.id, &user.email, &user.role)?;

        Ok((user, token))
    }

    /// Get a user's profile by ID
    pub async fn get_profile(&self, user_id: i32) -> AppResult<UserModel> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = User::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
