//! User administration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DocumentStorage, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, UploadedFile, User, UserChanges, UserDocument, UserId};

fn user_not_found() -> Error {
    Error::not_found("User not found")
}

/// Implements [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UsersService {
    users: Arc<dyn UserRepository>,
    storage: Arc<dyn DocumentStorage>,
}

impl UsersService {
    /// Create a service over the user store and upload storage.
    pub fn new(users: Arc<dyn UserRepository>, storage: Arc<dyn DocumentStorage>) -> Self {
        Self { users, storage }
    }
}

#[async_trait]
impl UsersQuery for UsersService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.users.list().await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.users.find_by_id(id).await?.ok_or_else(user_not_found)
    }
}

#[async_trait]
impl UsersCommand for UsersService {
    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<(), Error> {
        let mut user = self.get_user(id).await?;
        changes.apply(&mut user);
        if !self.users.update_profile(&user).await? {
            return Err(user_not_found());
        }
        info!(user_id = %id, "user updated");
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        if !self.users.delete(id).await? {
            return Err(user_not_found());
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn upload_documents(
        &self,
        id: &UserId,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<UserDocument>, Error> {
        if files.is_empty() {
            return Err(Error::invalid_request("No files uploaded"));
        }
        self.get_user(id).await?;

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            let reference = self.storage.store(file).await?;
            documents.push(UserDocument {
                name: file.file_name.clone(),
                reference,
            });
        }

        if !self.users.append_documents(id, &documents).await? {
            return Err(user_not_found());
        }
        info!(user_id = %id, count = documents.len(), "documents attached");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::ports::{
        DocumentStorageError, MockDocumentStorage, MockUserRepository, UserPersistenceError,
    };
    use crate::domain::{Email, ErrorCode, PasswordHash, Role, UserProfile};

    fn sample_user(id: UserId) -> User {
        User::new(
            id,
            UserProfile {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                email: Email::new("grace@example.com").expect("valid email"),
                role: Role::User,
            },
            PasswordHash::from_encoded("$argon2id$stub"),
        )
    }

    fn upload(field: &str, name: &str) -> UploadedFile {
        UploadedFile {
            field: field.into(),
            file_name: name.into(),
            bytes: b"%PDF".to_vec(),
        }
    }

    fn service(users: MockUserRepository, storage: MockDocumentStorage) -> UsersService {
        UsersService::new(Arc::new(users), Arc::new(storage))
    }

    #[tokio::test]
    async fn update_applies_changes_to_stored_user() {
        let id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(id))
            .return_once(move |_| Ok(Some(sample_user(id))));
        users
            .expect_update_profile()
            .withf(|user| user.first_name == "Amazing" && user.last_name == "Hopper")
            .return_once(|_| Ok(true));

        let changes = UserChanges {
            first_name: Some("Amazing".into()),
            ..UserChanges::default()
        };
        service(users, MockDocumentStorage::new())
            .update_user(&id, changes)
            .await
            .expect("update succeeds");
    }

    #[tokio::test]
    async fn update_reports_duplicate_email() {
        let id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(sample_user(id))));
        users
            .expect_update_profile()
            .return_once(|_| Err(UserPersistenceError::duplicate_email("taken@example.com")));

        let changes = UserChanges {
            email: Some(Email::new("taken@example.com").expect("valid email")),
            ..UserChanges::default()
        };
        let error = service(users, MockDocumentStorage::new())
            .update_user(&id, changes)
            .await
            .expect_err("duplicate");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "User already exists");
    }

    #[tokio::test]
    async fn delete_of_unknown_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_delete().return_once(|_| Ok(false));

        let error = service(users, MockDocumentStorage::new())
            .delete_user(&UserId::random())
            .await
            .expect_err("missing");

        assert_eq!(error.message(), "User not found");
    }

    #[tokio::test]
    async fn empty_upload_is_rejected_before_lookup() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();

        let error = service(users, MockDocumentStorage::new())
            .upload_documents(&UserId::random(), Vec::new())
            .await
            .expect_err("no files");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "No files uploaded");
    }

    #[tokio::test]
    async fn upload_for_unknown_user_stores_nothing() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        let mut storage = MockDocumentStorage::new();
        storage.expect_store().never();

        let error = service(users, storage)
            .upload_documents(&UserId::random(), vec![upload("document", "id.pdf")])
            .await
            .expect_err("missing user");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn upload_records_stored_references() {
        let id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(sample_user(id))));
        users
            .expect_append_documents()
            .withf(|_, documents| documents.len() == 2)
            .return_once(|_, _| Ok(true));
        let mut storage = MockDocumentStorage::new();
        storage
            .expect_store()
            .times(2)
            .returning(|file| Ok(format!("public/{}/1-{}", file.folder(), file.file_name)));

        let documents = service(users, storage)
            .upload_documents(
                &id,
                vec![upload("document", "id.pdf"), upload("profile", "me.png")],
            )
            .await
            .expect("upload succeeds");

        assert_eq!(documents[0].reference, "public/documents/1-id.pdf");
        assert_eq!(documents[1].name, "me.png");
        assert_eq!(documents[1].reference, "public/profiles/1-me.png");
    }

    #[tokio::test]
    async fn storage_failure_is_internal() {
        let id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(sample_user(id))));
        users.expect_append_documents().never();
        let mut storage = MockDocumentStorage::new();
        storage
            .expect_store()
            .return_once(|_| Err(DocumentStorageError::write("disk full")));

        let error = service(users, storage)
            .upload_documents(&id, vec![upload("document", "id.pdf")])
            .await
            .expect_err("storage failure");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
