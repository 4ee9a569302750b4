//! Typed handler binding.
//!
//! A registration binds a subsystem method such as
//! `fn take_job(&self, character: Character, job_id: i64)` once, at startup.
//! [`Handler`] is implemented for every function of the shape
//! `Fn(&T, A1, .., An) -> R` where each parameter implements
//! [`FromEventArg`], so the binding is checked by the compiler and only the
//! per-position conversion happens at dispatch time.

use crate::args::{EventArg, FromEventArg};
use crate::error::InvocationError;
use std::marker::PhantomData;
use std::sync::Arc;

/// A callable that can receive a resolved argument list on a target.
///
/// `Args` is a marker tuple of the parameter types; it keeps the blanket
/// implementations for different arities apart.
pub trait Handler<T: ?Sized, Args>: Send + Sync + 'static {
    /// Number of positional parameters the handler takes.
    const ARITY: usize;

    /// Converts `args` to the parameter types and calls the handler on `target`.
    ///
    /// The handler's return value is discarded.
    fn call(&self, target: &T, args: Vec<EventArg>) -> Result<(), InvocationError>;
}

/// Converts the next argument to `A`.
///
/// `expected` and `received` are the handler's arity and the length of the
/// argument list, reported if the list runs out early.
fn extract<A: FromEventArg>(
    args: &mut impl Iterator<Item = (usize, EventArg)>,
    expected: usize,
    received: usize,
) -> Result<A, InvocationError> {
    let (position, arg) = args
        .next()
        .ok_or(InvocationError::ArityMismatch { expected, received })?;
    A::from_event_arg(arg).map_err(|found| InvocationError::ArgumentType {
        position,
        expected: A::EXPECTED,
        found: found.to_string(),
    })
}

macro_rules! impl_handler {
    ($arity:literal; $($ty:ident),*) => {
        impl<T, F, R, $($ty,)*> Handler<T, ($($ty,)*)> for F
        where
            T: ?Sized,
            F: Fn(&T, $($ty,)*) -> R + Send + Sync + 'static,
            $($ty: FromEventArg,)*
        {
            const ARITY: usize = $arity;

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, target: &T, args: Vec<EventArg>) -> Result<(), InvocationError> {
                let received = args.len();
                if received != $arity {
                    return Err(InvocationError::ArityMismatch {
                        expected: $arity,
                        received,
                    });
                }
                let mut args = args.into_iter().enumerate();
                $(
                    let $ty = extract::<$ty>(&mut args, $arity, received)?;
                )*
                let _ = (self)(target, $($ty,)*);
                Ok(())
            }
        }
    };
}

impl_handler!(0;);
impl_handler!(1; A1);
impl_handler!(2; A1, A2);
impl_handler!(3; A1, A2, A3);
impl_handler!(4; A1, A2, A3, A4);
impl_handler!(5; A1, A2, A3, A4, A5);
impl_handler!(6; A1, A2, A3, A4, A5, A6);
impl_handler!(7; A1, A2, A3, A4, A5, A6, A7);
impl_handler!(8; A1, A2, A3, A4, A5, A6, A7, A8);

/// Type-erased handler stored in the registration table.
pub(crate) trait EventHandler: Send + Sync {
    fn invoke(&self, args: Vec<EventArg>) -> Result<(), InvocationError>;

    fn arity(&self) -> usize;
}

/// A handler bound to its shared target instance.
pub(crate) struct BoundHandler<T: ?Sized, H, Args> {
    target: Arc<T>,
    handler: H,
    _args: PhantomData<fn() -> Args>,
}

impl<T: ?Sized, H, Args> BoundHandler<T, H, Args> {
    pub(crate) fn new(target: Arc<T>, handler: H) -> Self {
        Self {
            target,
            handler,
            _args: PhantomData,
        }
    }
}

impl<T, H, Args> EventHandler for BoundHandler<T, H, Args>
where
    T: ?Sized + Send + Sync + 'static,
    H: Handler<T, Args>,
    Args: 'static,
{
    fn invoke(&self, args: Vec<EventArg>) -> Result<(), InvocationError> {
        self.handler.call(&self.target, args)
    }

    fn arity(&self) -> usize {
        H::ARITY
    }
}
