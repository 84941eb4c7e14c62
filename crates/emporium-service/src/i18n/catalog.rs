//! Built-in English and Brazilian Portuguese messages.

use super::MessageProvider;
use emporium_core::{Locale, MessageKey};

/// Compiled-in message catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticMessages;

impl StaticMessages {
    #[must_use]
    pub const fn lookup(key: MessageKey, locale: Locale) -> &'static str {
        match locale {
            Locale::En => english(key),
            Locale::PtBr => portuguese(key),
        }
    }
}

impl MessageProvider for StaticMessages {
    fn message(&self, key: MessageKey, locale: Locale) -> String {
        Self::lookup(key, locale).to_string()
    }
}

const fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::CategoryNotFound => "Category not found",
        MessageKey::CategoryTitleTaken => "A category with this title already exists",
        MessageKey::CategoryInUse => "The category still has products",
        MessageKey::CompanyNotFound => "Company not found",
        MessageKey::ProductNotFound => "Product not found",
        MessageKey::ReviewNotFound => "Review not found",
        MessageKey::UserNotFound => "User not found",
        MessageKey::EmailAlreadyInUse => "Email is already in use",
        MessageKey::InvalidCredentials => "Invalid email or password",
        MessageKey::InvalidSortDirection => "Sort direction must be 'asc' or 'desc'",
        MessageKey::InvalidSortColumn => "Unknown sort column",
        MessageKey::InvalidPriceRange => "Invalid price range",
        MessageKey::InvalidCategoryList => "lastCategories must be a comma-separated list of ids",
        MessageKey::InvalidQueryParameters => "Malformed query parameters",
        MessageKey::AuthenticationRequired => "Authentication is required",
        MessageKey::AdminRequired => "Administrator role is required",
        MessageKey::NotProductOwner => "Only the company owner can change this product",
        MessageKey::NotCompanyOwner => "Only the owner can change this company",
        MessageKey::NotReviewAuthor => "Only the author can change this review",
        MessageKey::NotAccountOwner => "You can only access your own account",
        MessageKey::NoRowsAffected => "The operation did not affect any rows",
        MessageKey::ReferenceViolation => "The request references a missing or in-use record",
        MessageKey::InternalError => "Internal server error",
    }
}

const fn portuguese(key: MessageKey) -> &'static str {
    match key {
        MessageKey::CategoryNotFound => "Categoria não encontrada",
        MessageKey::CategoryTitleTaken => "Já existe uma categoria com este título",
        MessageKey::CategoryInUse => "A categoria ainda possui produtos",
        MessageKey::CompanyNotFound => "Empresa não encontrada",
        MessageKey::ProductNotFound => "Produto não encontrado",
        MessageKey::ReviewNotFound => "Avaliação não encontrada",
        MessageKey::UserNotFound => "Usuário não encontrado",
        MessageKey::EmailAlreadyInUse => "E-mail já está em uso",
        MessageKey::InvalidCredentials => "E-mail ou senha inválidos",
        MessageKey::InvalidSortDirection => "A direção de ordenação deve ser 'asc' ou 'desc'",
        MessageKey::InvalidSortColumn => "Coluna de ordenação desconhecida",
        MessageKey::InvalidPriceRange => "Faixa de preço inválida",
        MessageKey::InvalidCategoryList => {
            "lastCategories deve ser uma lista de ids separados por vírgula"
        }
        MessageKey::InvalidQueryParameters => "Parâmetros de consulta malformados",
        MessageKey::AuthenticationRequired => "É necessário autenticar-se",
        MessageKey::AdminRequired => "É necessário ser administrador",
        MessageKey::NotProductOwner => "Somente o dono da empresa pode alterar este produto",
        MessageKey::NotCompanyOwner => "Somente o dono pode alterar esta empresa",
        MessageKey::NotReviewAuthor => "Somente o autor pode alterar esta avaliação",
        MessageKey::NotAccountOwner => "Você só pode acessar a sua própria conta",
        MessageKey::NoRowsAffected => "A operação não afetou nenhuma linha",
        MessageKey::ReferenceViolation => {
            "A requisição referencia um registro inexistente ou em uso"
        }
        MessageKey::InternalError => "Erro interno do servidor",
    }
}
