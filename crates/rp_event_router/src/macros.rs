/// Registers a fixed table of events on a [`RouterBuilder`](crate::RouterBuilder).
///
/// Each row names the event, the shared target, the method and, optionally,
/// a bracketed list of [`EventOption`](crate::EventOption)s. The method name
/// recorded on the registration is taken from the row itself.
///
/// Registration stops at the first duplicate and the macro evaluates to
/// `Result<(), RouterError>`.
///
/// ```rust
/// use rp_event_router::{register_events, Character, ClientId, EventRouter};
/// # use rp_event_router::IdentityProvider;
/// use std::sync::Arc;
///
/// struct Jobs;
///
/// impl Jobs {
///     fn list(&self, _client: ClientId) {}
///     fn accept(&self, _character: Character, _job_id: i64) {}
/// }
///
/// # struct Nobody;
/// # impl IdentityProvider for Nobody {
/// #     fn has_active_character(&self, _: ClientId) -> bool { false }
/// #     fn active_character(&self, _: ClientId) -> Option<Character> { None }
/// # }
/// let jobs = Arc::new(Jobs);
/// let mut builder = EventRouter::builder();
/// register_events!(builder;
///     "EVENT_LIST_JOBS" => jobs, <Jobs>::list;
///     "EVENT_ACCEPT_JOB" => jobs, <Jobs>::accept [UsesCharacter];
/// )
/// .unwrap();
/// let router = builder.build(Arc::new(Nobody)).unwrap();
/// assert_eq!(router.len(), 2);
/// ```
#[macro_export]
macro_rules! register_events {
    (
        $builder:expr;
        $(
            $name:literal => $target:expr, <$ty:ty>::$method:ident $([$($option:ident),* $(,)?])?
        );* $(;)?
    ) => {{
        let builder: &mut $crate::RouterBuilder = &mut $builder;
        let mut result: ::std::result::Result<(), $crate::RouterError> = Ok(());
        $(
            if result.is_ok() {
                let options = $crate::EventOptions::NONE
                    $($(| $crate::EventOption::$option.flag())*)?;
                result = builder
                    .register($name, &$target, stringify!($method), <$ty>::$method, options)
                    .map(|_| ());
            }
        )*
        result
    }};
}
