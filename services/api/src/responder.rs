//! Canned chatbot responses
//!
//! There is no model behind the chatbot; a reply is chosen uniformly at
//! random from a fixed list. The strategy sits behind a trait so a real
//! backend can replace it without touching any call site.

use rand::Rng;

/// Strategy for producing a chatbot reply to a user message
pub trait ResponseSource: Send + Sync {
    /// Produce a reply for the given input
    fn respond(&self, input: &str) -> String;
}

/// A `ResponseSource` choosing uniformly at random from a fixed list
pub struct CannedResponses {
    replies: Vec<String>,
}

impl CannedResponses {
    /// Build a source from an explicit list of replies
    pub fn new(replies: Vec<String>) -> Self {
        Self { replies }
    }

    /// The stock travel-companion replies of the original product
    pub fn travel_companion() -> Self {
        Self::new(vec![
            "That's a great question about traveling in India! Based on your query, I'd recommend \
             exploring the cultural heritage sites and trying the local cuisine."
                .to_string(),
            "India offers incredible diversity in destinations. Would you like me to suggest some \
             routes based on your interests?"
                .to_string(),
            "For safety while traveling, I always recommend staying connected with local guides \
             and keeping emergency contacts handy."
                .to_string(),
            "The best time to visit varies by region. Northern India is great in winter, while \
             the south is pleasant year-round."
                .to_string(),
            "I can help you with language translations, local customs, and finding the best \
             authentic experiences!"
                .to_string(),
        ])
    }
}

impl ResponseSource for CannedResponses {
    fn respond(&self, _input: &str) -> String {
        if self.replies.is_empty() {
            return "I'm not sure how to help with that yet.".to_string();
        }

        let index = rand::thread_rng().gen_range(0..self.replies.len());
        self.replies[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_is_always_one_of_the_configured_set() {
        let source = CannedResponses::travel_companion();
        let replies = CannedResponses::travel_companion().replies;

        for _ in 0..50 {
            let reply = source.respond("Where should I go in December?");
            assert!(replies.contains(&reply));
        }
    }

    #[test]
    fn single_reply_source_is_deterministic() {
        let source = CannedResponses::new(vec!["Namaste!".to_string()]);
        assert_eq!(source.respond("hello"), "Namaste!");
        assert_eq!(source.respond("anything"), "Namaste!");
    }

    #[test]
    fn empty_source_still_answers() {
        let source = CannedResponses::new(vec![]);
        assert!(!source.respond("hello").is_empty());
    }

    #[test]
    fn the_strategy_is_swappable() {
        struct Echo;

        impl ResponseSource for Echo {
            fn respond(&self, input: &str) -> String {
                format!("echo: {}", input)
            }
        }

        let source: Box<dyn ResponseSource> = Box::new(Echo);
        assert_eq!(source.respond("hi"), "echo: hi");
    }
}
