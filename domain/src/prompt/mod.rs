//! Prompt domain
//!
//! Fixed strings the agent speaks with: the persona sent as system
//! instruction, the seeded welcome line, and the fallbacks used when an
//! exchange yields nothing usable.

/// System instruction attached once per chat request, outside the turn history.
pub const PERSONA: &str = "You are the MOG Agent. You represent the $MOG coin on Solana. \
You are superior, confident, and obsessed with 'mogging' (dominating) the crypto markets \
and physical looks-maxxing. \nRULES:\n\
1. Be extremely concise.\n\
2. Use Mog terminology: 'Mogged', 'Looks-maxxing', 'Solana Summer', 'Superiority'.\n\
3. Never mention AI companies.\n\
4. You are the ultimate advisor for winners.";

/// Synthetic first message of every session. Never sent to the provider.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Mog Sanctum. I am the Mog Agent. Ready to looks-maxx your portfolio?";

/// Replaces an empty or missing chat result.
pub const EMPTY_REPLY_FALLBACK: &str = "Mogged by silence.";

/// The single agent message appended when an exchange fails.
pub const FAILURE_FALLBACK: &str =
    "Portfolio too weak to process. Try again when you are superior.";

/// Text part sent on the image path when the user typed nothing.
pub const DEFAULT_IMAGE_PROMPT: &str = "Mog this image";

/// Prefix of the displayed user text when an attachment rides along.
pub const ATTACHMENT_ANNOTATION: &str = "[Mog Analysis Required]";

/// Displayed user text when only an attachment was submitted.
pub const ATTACHMENT_PLACEHOLDER: &str = "[Image Analysis]";

/// Display string for a user submission.
///
/// Without an attachment the text is shown as typed. With one, free text is
/// prefixed by [`ATTACHMENT_ANNOTATION`], or replaced by
/// [`ATTACHMENT_PLACEHOLDER`] when empty.
pub fn user_display_text(text: &str, has_attachment: bool) -> String {
    if !has_attachment {
        return text.to_string();
    }
    if text.trim().is_empty() {
        ATTACHMENT_PLACEHOLDER.to_string()
    } else {
        format!("{} {}", ATTACHMENT_ANNOTATION, text)
    }
}
