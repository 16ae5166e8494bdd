//! Declarative reply endpoints.
//!
//! [`ReplyRule`]s come from configuration: "when the text is exactly X, answer
//! Y". The runtime knows nothing about how to answer, so the caller supplies a
//! `send` function that delivers a reply through whatever transport handle its
//! context carries.

use std::sync::Arc;

use switchyard_core::Routable;
use switchyard_router::{Condition, RouteResult, Router};
use tracing::debug;

use crate::config::ReplyRule;

/// Registers one endpoint per rule, in order.
///
/// Every condition is checked before anything is registered: if any rule's
/// `when` is not a literal, the router is left untouched and
/// [`RouteError::InvalidConditionKind`](switchyard_router::RouteError::InvalidConditionKind)
/// is returned. Returns the number of endpoints registered.
pub fn register_replies<C, E, S>(router: &Router<C, E>, rules: &[ReplyRule], send: S) -> RouteResult<usize>
where
    C: Routable + 'static,
    E: 'static,
    S: Fn(&mut C, &str) -> Result<(), E> + Send + Sync + 'static,
{
    let conditions = rules
        .iter()
        .map(|rule| Condition::<C>::try_from(&rule.when))
        .collect::<RouteResult<Vec<_>>>()?;

    let send = Arc::new(send);
    for (condition, rule) in conditions.into_iter().zip(rules) {
        let send = Arc::clone(&send);
        let reply = rule.reply.clone();
        router.handler(condition, move |ctx: &mut C| send(ctx, &reply));
    }

    debug!(count = rules.len(), "Registered reply endpoints");
    Ok(rules.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use switchyard_core::Context;
    use switchyard_router::RouteError;

    #[derive(Debug, PartialEq)]
    struct Sent(Vec<String>);

    type Ctx = Context<String, ()>;

    fn send(ctx: &mut Ctx, text: &str) -> Result<(), String> {
        ctx.fields_mut()
            .get_or_insert_with(|| Sent(Vec::new()))
            .0
            .push(text.to_string());
        Ok(())
    }

    #[test]
    fn test_replies_registered_in_order() {
        let router: Router<Ctx, String> = Router::new();
        let rules = vec![
            ReplyRule::new("/ping", "pong"),
            ReplyRule::new("/ping", "shadowed"),
            ReplyRule::new("/help", "no help for you"),
        ];
        assert_eq!(register_replies(&router, &rules, send), Ok(3));

        let mut ctx = Context::new("/ping".to_string(), ());
        router.route(&mut ctx).unwrap();
        assert_eq!(ctx.fields().get::<Sent>(), Some(&Sent(vec!["pong".to_string()])));
    }

    #[test]
    fn test_invalid_rule_registers_nothing() {
        let router: Router<Ctx, String> = Router::new();
        let rules = vec![
            ReplyRule::new("/ping", "pong"),
            ReplyRule {
                when: json!({"regex": "^/p"}),
                reply: "nope".to_string(),
            },
        ];

        assert_eq!(
            register_replies(&router, &rules, send),
            Err(RouteError::InvalidConditionKind { found: "object" })
        );
        assert!(router.is_empty());
    }
}
