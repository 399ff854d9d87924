//! Unified error codes for the user services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
///
/// Codes are `u16` values so they stay stable in logs and across both services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request (malformed body, bad path parameter)
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,
    /// No route matched the request
    RouteNotFound = 9,

    // ==================== 1xxx: Auth ====================
    /// Password did not match
    InvalidCredentials = 1002,

    // ==================== 2xxx: Permission ====================
    /// Administrator role required
    AdminRequired = 2003,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered to another user
    EmailAlreadyExists = 8002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the client-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Dados inválidos",
            ErrorCode::InvalidRequest => "Requisição inválida",
            ErrorCode::ValueOutOfRange => "Valor fora do intervalo permitido",
            ErrorCode::RouteNotFound => "Rota não encontrada",

            ErrorCode::InvalidCredentials => "Senha incorreta",

            ErrorCode::AdminRequired => "Usuário não é um administrador",

            ErrorCode::UserNotFound => "Usuário não encontrado",
            ErrorCode::EmailAlreadyExists => "Email já cadastrado",

            ErrorCode::DatabaseError => "Erro no banco de dados",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RouteNotFound.code(), 9);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::UserNotFound.code(), 8001);
        assert_eq!(ErrorCode::EmailAlreadyExists.code(), 8002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::UserNotFound.to_string(), "8001");
        assert_eq!(u16::from(ErrorCode::DatabaseError), 9002);
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::UserNotFound.message(), "Usuário não encontrado");
        assert_eq!(ErrorCode::RouteNotFound.message(), "Rota não encontrada");
        assert_eq!(ErrorCode::InvalidCredentials.message(), "Senha incorreta");
    }
}
