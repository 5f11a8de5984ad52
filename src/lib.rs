//! # Doorman - Session-Based Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the
//! doorman components. Use this crate to get access to the whole
//! authentication stack in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! doorman = { path = "../doorman" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Session`, etc.
//! - **Port traits**: `UserStore`, `SessionStore`, `VerificationCodeStore`,
//!   `TokenCodec`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `JwtTokenCodec`, `ResendEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use doorman_core::*;
}

// Re-export most commonly used core types at the root level
pub use doorman_core::{
    AuthError, AuthErrorKind, AuthPolicy, DomainError, Email, Password, Session, SessionId,
    SessionView, User, UserId, UserView, VerificationCode, VerificationCodeId,
    VerificationCodeKind,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use doorman_core::{
        Clock, EmailClient, EmailClientError, SessionStore, SessionStoreError, SystemClock,
        TokenCodec, TokenError, UserStore, UserStoreError, VerificationCodeStore,
        VerificationCodeStoreError,
    };
}

// Re-export port traits at root level
pub use doorman_core::{
    Clock, EmailClient, EmailClientError, SessionStore, SessionStoreError, SystemClock, TokenCodec,
    TokenError, UserStore, UserStoreError, VerificationCodeStore, VerificationCodeStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use doorman_application::*;
}

// Re-export use cases at root level
pub use doorman_application::{
    DeleteSessionUseCase, GetUserUseCase, ListSessionsUseCase, LoginUseCase, LogoutUseCase,
    RefreshUseCase, RegisterUseCase, RequestPasswordResetUseCase, ResetPasswordUseCase,
    VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use doorman_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use doorman_adapters::email::*;
    }

    /// Token codec implementations
    pub mod tokens {
        pub use doorman_adapters::tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use doorman_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use doorman_adapters::{
    HashMapSessionStore, HashMapUserStore, HashMapVerificationCodeStore, JwtTokenCodec,
    MockEmailClient, PostgresSessionStore, PostgresUserStore, PostgresVerificationCodeStore,
    ResendEmailClient, Settings, TokenConfig,
};

// ============================================================================
// HTTP Layer
// ============================================================================

/// Axum handlers, extractors and state
pub mod web {
    pub use doorman_axum::*;
}

pub use doorman_axum::{ApiError, AppState, AuthenticatedSession};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use doorman_service::{AuthService, configure_postgresql};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
