//! Shared application state for all HTTP handlers.

use std::sync::Arc;

use crate::application::handlers::auth::{
    GetProfileHandler, LoginHandler, ProfileReader, RegisterUserHandler, UpdateProfileHandler,
};
use crate::application::handlers::exchange::{
    CreateExchangeHandler, ExchangeQueryHandler, TransitionExchangeHandler,
};
use crate::application::handlers::listing::{
    CreateItemHandler, CreateSkillHandler, DeleteItemHandler, DeleteSkillHandler,
    ItemQueryHandler, OwnerDirectory, SkillQueryHandler, UpdateItemHandler, UpdateSkillHandler,
};
use crate::application::handlers::messaging::{
    GetConversationHandler, MarkMessageReadHandler, SendMessageHandler,
};
use crate::application::handlers::notification::NotificationInboxHandler;
use crate::application::handlers::review::{CreateReviewHandler, ReviewQueryHandler};
use crate::ports::{
    ExchangeRepository, FileStorage, ItemListingRepository, MessageRepository,
    NotificationRepository, PasswordHasher, ReviewRepository, SessionValidator,
    SkillListingRepository, TokenIssuer, UserRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is an `Arc` so clones are cheap.
/// Handlers are built on demand from these ports.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemListingRepository>,
    pub skills: Arc<dyn SkillListingRepository>,
    pub exchanges: Arc<dyn ExchangeRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub file_storage: Arc<dyn FileStorage>,
    pub max_upload_bytes: usize,
}

impl AppState {
    // ── Auth & profile ─────────────────────────────────────────────────────

    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone(), self.password_hasher.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    fn profile_reader(&self) -> ProfileReader {
        ProfileReader::new(
            self.users.clone(),
            self.exchanges.clone(),
            self.reviews.clone(),
        )
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profile_reader())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone(), self.profile_reader())
    }

    // ── Listings ───────────────────────────────────────────────────────────

    fn owners(&self) -> OwnerDirectory {
        OwnerDirectory::new(self.users.clone(), self.reviews.clone())
    }

    pub fn item_queries(&self) -> ItemQueryHandler {
        ItemQueryHandler::new(self.items.clone(), self.owners())
    }

    pub fn create_item_handler(&self) -> CreateItemHandler {
        CreateItemHandler::new(self.items.clone(), self.owners())
    }

    pub fn update_item_handler(&self) -> UpdateItemHandler {
        UpdateItemHandler::new(self.items.clone(), self.owners())
    }

    pub fn delete_item_handler(&self) -> DeleteItemHandler {
        DeleteItemHandler::new(self.items.clone())
    }

    pub fn skill_queries(&self) -> SkillQueryHandler {
        SkillQueryHandler::new(self.skills.clone(), self.owners())
    }

    pub fn create_skill_handler(&self) -> CreateSkillHandler {
        CreateSkillHandler::new(self.skills.clone(), self.owners())
    }

    pub fn update_skill_handler(&self) -> UpdateSkillHandler {
        UpdateSkillHandler::new(self.skills.clone(), self.owners())
    }

    pub fn delete_skill_handler(&self) -> DeleteSkillHandler {
        DeleteSkillHandler::new(self.skills.clone())
    }

    // ── Exchanges ──────────────────────────────────────────────────────────

    pub fn create_exchange_handler(&self) -> CreateExchangeHandler {
        CreateExchangeHandler::new(
            self.users.clone(),
            self.items.clone(),
            self.skills.clone(),
            self.exchanges.clone(),
        )
    }

    pub fn transition_exchange_handler(&self) -> TransitionExchangeHandler {
        TransitionExchangeHandler::new(self.users.clone(), self.exchanges.clone())
    }

    pub fn exchange_queries(&self) -> ExchangeQueryHandler {
        ExchangeQueryHandler::new(self.exchanges.clone())
    }

    // ── Messaging, notifications, reviews ──────────────────────────────────

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.users.clone(),
            self.exchanges.clone(),
            self.messages.clone(),
        )
    }

    pub fn conversation_handler(&self) -> GetConversationHandler {
        GetConversationHandler::new(self.exchanges.clone(), self.messages.clone())
    }

    pub fn mark_message_read_handler(&self) -> MarkMessageReadHandler {
        MarkMessageReadHandler::new(self.messages.clone())
    }

    pub fn notification_inbox(&self) -> NotificationInboxHandler {
        NotificationInboxHandler::new(self.notifications.clone())
    }

    pub fn create_review_handler(&self) -> CreateReviewHandler {
        CreateReviewHandler::new(
            self.users.clone(),
            self.exchanges.clone(),
            self.reviews.clone(),
        )
    }

    pub fn review_queries(&self) -> ReviewQueryHandler {
        ReviewQueryHandler::new(self.reviews.clone())
    }
}
