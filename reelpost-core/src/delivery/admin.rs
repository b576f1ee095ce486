//! Bot admin verification.

use tracing::{debug, warn};

use super::outcome::{AdminDiagnostic, DeliveryOutcome};
use crate::telegram::{ChatPlatform, PlatformRejection, TelegramError, User};

/// Result of checking the bot's rights in a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCheck {
    Confirmed { bot: User },
    NotAdmin(AdminDiagnostic),
    Failed { reason: String },
}

impl AdminCheck {
    /// Outcome that ends the request, `None` when posting may proceed.
    pub fn into_outcome(self) -> Option<DeliveryOutcome> {
        match self {
            AdminCheck::Confirmed { .. } => None,
            AdminCheck::NotAdmin(diagnostic) => Some(DeliveryOutcome::AdminError(diagnostic)),
            AdminCheck::Failed { reason } => Some(DeliveryOutcome::AdminCheckFailed { reason }),
        }
    }
}

/// Looks up the bot's own identity, then its membership in `channel_id`.
///
/// A refusal saying the bot is absent from the channel means it is not a
/// member. Rate limits, other refusals and transport failures leave the
/// status unknown.
pub async fn check_admin(chat: &dyn ChatPlatform, channel_id: &str) -> AdminCheck {
    let bot = match chat.get_me().await {
        Ok(bot) => bot,
        Err(e) => {
            warn!(error = %e, "getMe failed");
            return AdminCheck::Failed {
                reason: format!("could not identify the bot: {e}"),
            };
        }
    };

    match chat.get_chat_member(channel_id, bot.id).await {
        Ok(member) if member.is_admin() => {
            debug!(channel = channel_id, status = %member.status, "Bot is channel admin");
            AdminCheck::Confirmed { bot }
        }
        Ok(member) => {
            warn!(channel = channel_id, status = %member.status, "Bot is not channel admin");
            AdminCheck::NotAdmin(AdminDiagnostic::not_admin(&bot, &member.status))
        }
        Err(TelegramError::Rejected(rejection)) if rejection.denies_membership() => {
            warn!(channel = channel_id, %rejection, "Bot membership lookup refused");
            let reason = match &rejection {
                PlatformRejection::Forbidden { description }
                | PlatformRejection::Other { description, .. } => description.clone(),
                PlatformRejection::RateLimited { .. } => rejection.to_string(),
            };
            AdminCheck::NotAdmin(AdminDiagnostic::not_member(&bot, &reason))
        }
        Err(e) => {
            warn!(channel = channel_id, error = %e, "getChatMember failed");
            AdminCheck::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChat;

    #[tokio::test]
    async fn test_confirmed_admin() {
        let chat = FakeChat::new().with_member_status("@films", "administrator");
        let check = check_admin(&chat, "@films").await;
        assert!(matches!(check, AdminCheck::Confirmed { .. }));
        assert_eq!(check.into_outcome(), None);
    }

    #[tokio::test]
    async fn test_member_without_rights() {
        let chat = FakeChat::new().with_member_status("@films", "member");
        let AdminCheck::NotAdmin(diagnostic) = check_admin(&chat, "@films").await else {
            panic!("expected NotAdmin");
        };
        assert!(diagnostic.message.contains("status: member"));
        assert_eq!(diagnostic.bot_username, "@reelpost_test_bot");
    }

    #[tokio::test]
    async fn test_bot_never_added() {
        let chat = FakeChat::new().with_member_rejection(
            "@films",
            PlatformRejection::Other {
                error_code: Some(400),
                description: "Bad Request: member not found".to_string(),
            },
        );
        let AdminCheck::NotAdmin(diagnostic) = check_admin(&chat, "@films").await else {
            panic!("expected NotAdmin");
        };
        assert!(diagnostic.message.contains("member not found"));
        assert!(!diagnostic.bot_username.is_empty());
    }

    #[tokio::test]
    async fn test_get_me_failure() {
        let chat = FakeChat::new().without_identity();
        let check = check_admin(&chat, "@films").await;
        assert!(matches!(check, AdminCheck::Failed { .. }));
        assert!(matches!(
            check.into_outcome(),
            Some(DeliveryOutcome::AdminCheckFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_rate_limited_lookup_is_not_a_verdict() {
        let chat = FakeChat::new().with_member_rejection(
            "@films",
            PlatformRejection::RateLimited { retry_after: 30 },
        );
        let check = check_admin(&chat, "@films").await;
        let AdminCheck::Failed { reason } = &check else {
            panic!("expected Failed, got {check:?}");
        };
        assert!(reason.contains("retry after 30s"));
        assert!(matches!(
            check.into_outcome(),
            Some(DeliveryOutcome::AdminCheckFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_unrelated_rejection_is_not_a_verdict() {
        let chat = FakeChat::new().with_member_rejection(
            "@films",
            PlatformRejection::Other {
                error_code: Some(500),
                description: "Internal Server Error".to_string(),
            },
        );
        assert!(matches!(
            check_admin(&chat, "@films").await,
            AdminCheck::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_unknown_channel_is_not_member() {
        let chat = FakeChat::new().with_member_rejection(
            "@films",
            PlatformRejection::Other {
                error_code: Some(400),
                description: "Bad Request: chat not found".to_string(),
            },
        );
        assert!(matches!(
            check_admin(&chat, "@films").await,
            AdminCheck::NotAdmin(_)
        ));
    }
}
