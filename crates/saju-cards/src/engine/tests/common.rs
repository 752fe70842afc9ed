use crate::catalog::{Card, CardScope, CardStatus, DEFAULT_RULE_SET};
use crate::engine::tokens::TokenSet;

pub(super) fn tokens(items: &[&str]) -> TokenSet {
    items.iter().map(|t| t.to_string()).collect()
}

pub(super) fn card(card_id: &str, priority: i32, trigger: &str) -> Card {
    Card {
        uid: format!("uid-{card_id}"),
        card_id: card_id.to_string(),
        version: 1,
        status: CardStatus::Published,
        rule_set: DEFAULT_RULE_SET.to_string(),
        scope: CardScope::Saju,
        title: card_id.to_string(),
        category: String::new(),
        tags: Vec::new(),
        domains: Vec::new(),
        priority,
        trigger: trigger.to_string(),
        score: None,
        content: "{}".to_string(),
        cooldown_group: String::new(),
        max_per_user: 0,
        deleted_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub(super) fn scored(mut base: Card, score: &str) -> Card {
    base.score = Some(score.to_string());
    base
}

pub(super) fn in_cooldown_group(mut base: Card, group: &str) -> Card {
    base.cooldown_group = group.to_string();
    base
}

pub(super) fn in_domains(mut base: Card, domains: &[&str]) -> Card {
    base.domains = domains.iter().map(|d| d.to_string()).collect();
    base
}

pub(super) fn with_tags(mut base: Card, tags: &[&str]) -> Card {
    base.tags = tags.iter().map(|t| t.to_string()).collect();
    base
}
