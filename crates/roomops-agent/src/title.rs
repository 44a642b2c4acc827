// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation title synthesis.

use roomops_core::ChatProvider;
use tracing::warn;

const TITLE_SYSTEM_PROMPT: &str = "Generate a short title summarizing the user's message. \
                                   At most 80 characters, no quotes, no colons.";

const FALLBACK_TITLE: &str = "New conversation";

const MAX_TITLE_CHARS: usize = 80;

/// Asks the provider for a title, degrading to a fixed fallback on failure.
/// A new conversation must never fail to be created because titling did.
pub async fn synthesize_title(provider: &dyn ChatProvider, user_text: &str) -> String {
    match provider.complete_text(TITLE_SYSTEM_PROMPT, user_text).await {
        Ok(title) => {
            let title = title.trim();
            if title.is_empty() {
                return FALLBACK_TITLE.to_string();
            }
            title.chars().take(MAX_TITLE_CHARS).collect()
        }
        Err(e) => {
            warn!(error = %e, "title generation failed, using fallback");
            FALLBACK_TITLE.to_string()
        }
    }
}
