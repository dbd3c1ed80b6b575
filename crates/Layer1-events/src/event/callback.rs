//! Callback - 리스너로 등록 가능한 값
//!
//! 등록 시점에는 호출 가능 여부를 검사하지 않습니다. 호출할 수 없는 값
//! (`Callback::Invalid`, 존재하지 않는 메서드 이름)은 emit 시점에
//! [`Error::NotInvocable`]로 드러납니다.

use crate::{Error, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// 리스너 실행 결과
pub type ListenerResult = anyhow::Result<()>;

/// 정적 메서드 참조 시그니처
pub type StaticFn = fn(&[Value]) -> ListenerResult;

// ============================================================================
// Listener / MethodDispatch Trait
// ============================================================================

/// 이벤트 리스너 trait
///
/// emit 인자 전체가 순서대로 전달됩니다. 리스너는 필요한 만큼만 읽으면 됩니다.
pub trait Listener: Send + Sync {
    fn call(&self, args: &[Value]) -> ListenerResult;
}

impl<F> Listener for F
where
    F: Fn(&[Value]) -> ListenerResult + Send + Sync,
{
    fn call(&self, args: &[Value]) -> ListenerResult {
        self(args)
    }
}

/// 이름으로 메서드를 호출할 수 있는 객체 (bound method 용)
///
/// 모르는 메서드 이름이면 `None`을 반환합니다.
pub trait MethodDispatch: Send + Sync {
    /// 디버깅용 타입 이름
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn call_method(&self, method: &str, args: &[Value]) -> Option<ListenerResult>;
}

// ============================================================================
// Callback
// ============================================================================

/// 리스너로 등록되는 값
///
/// 동일성(`==`)은 `remove_listener`에서 사용됩니다:
/// - `Function`: 같은 `Arc` 할당
/// - `Method`: 같은 receiver 할당 + 같은 메서드 이름
/// - `Static`: 같은 타입 이름 + 같은 메서드 이름
/// - `Invalid`: 같은 값
#[derive(Clone)]
pub enum Callback {
    /// 클로저 또는 함수
    Function(Arc<dyn Listener>),

    /// 인스턴스에 바인딩된 메서드
    Method {
        receiver: Arc<dyn MethodDispatch>,
        method: Cow<'static, str>,
    },

    /// 정적 메서드 참조
    Static {
        type_name: Cow<'static, str>,
        method: Cow<'static, str>,
        func: StaticFn,
    },

    /// 호출 불가능한 값 (등록은 허용, emit 시 실패)
    Invalid(Value),
}

impl Callback {
    /// 클로저로부터 생성
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> ListenerResult + Send + Sync + 'static,
    {
        Callback::Function(Arc::new(f))
    }

    /// 이미 공유 중인 리스너로부터 생성
    pub fn from_listener(listener: Arc<dyn Listener>) -> Self {
        Callback::Function(listener)
    }

    /// bound method 생성
    pub fn method<R>(receiver: Arc<R>, method: impl Into<Cow<'static, str>>) -> Self
    where
        R: MethodDispatch + 'static,
    {
        Callback::Method {
            receiver,
            method: method.into(),
        }
    }

    /// 정적 메서드 참조 생성
    pub fn static_method(
        type_name: impl Into<Cow<'static, str>>,
        method: impl Into<Cow<'static, str>>,
        func: StaticFn,
    ) -> Self {
        Callback::Static {
            type_name: type_name.into(),
            method: method.into(),
            func,
        }
    }

    /// 호출 불가능한 값 (검증 없이 등록됨)
    pub fn invalid(value: impl Into<Value>) -> Self {
        Callback::Invalid(value.into())
    }

    /// 로그/에러 메시지용 설명
    pub fn describe(&self) -> String {
        match self {
            Callback::Function(listener) => format!("function@{:p}", data_ptr(listener)),
            Callback::Method { receiver, method } => {
                format!("{}->{}", receiver.type_name(), method)
            }
            Callback::Static {
                type_name, method, ..
            } => format!("{}::{}", type_name, method),
            Callback::Invalid(value) => value.to_string(),
        }
    }

    /// 콜백 실행
    ///
    /// 리스너 에러는 [`Error::Listener`], 호출 불가능한 값은
    /// [`Error::NotInvocable`]로 변환됩니다.
    pub fn invoke(&self, event: &str, args: &[Value]) -> Result<()> {
        let outcome = match self {
            Callback::Function(listener) => listener.call(args),
            Callback::Method { receiver, method } => match receiver.call_method(method, args) {
                Some(outcome) => outcome,
                None => return Err(Error::not_invocable(event, self.describe())),
            },
            Callback::Static { func, .. } => func(args),
            Callback::Invalid(_) => return Err(Error::not_invocable(event, self.describe())),
        };

        outcome.map_err(|source| Error::listener(event, self.describe(), source))
    }
}

/// vtable을 제외한 데이터 포인터
fn data_ptr<T: ?Sized>(arc: &Arc<T>) -> *const () {
    Arc::as_ptr(arc) as *const ()
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callback::Function(a), Callback::Function(b)) => data_ptr(a) == data_ptr(b),
            (
                Callback::Method {
                    receiver: ra,
                    method: ma,
                },
                Callback::Method {
                    receiver: rb,
                    method: mb,
                },
            ) => data_ptr(ra) == data_ptr(rb) && ma == mb,
            (
                Callback::Static {
                    type_name: ta,
                    method: ma,
                    ..
                },
                Callback::Static {
                    type_name: tb,
                    method: mb,
                    ..
                },
            ) => ta == tb && ma == mb,
            (Callback::Invalid(a), Callback::Invalid(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.describe()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        hits: AtomicUsize,
    }

    impl MethodDispatch for Counter {
        fn call_method(&self, method: &str, _args: &[Value]) -> Option<ListenerResult> {
            match method {
                "on_foo" => {
                    self.hits.fetch_add(1, Ordering::SeqCst);
                    Some(Ok(()))
                }
                _ => None,
            }
        }
    }

    fn on_bar(_args: &[Value]) -> ListenerResult {
        Ok(())
    }

    #[test]
    fn test_function_identity() {
        let a = Callback::new(|_| Ok(()));
        let b = Callback::new(|_| Ok(()));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_method_identity_and_dispatch() {
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        let other = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });

        let cb = Callback::method(counter.clone(), "on_foo");
        assert_eq!(cb, Callback::method(counter.clone(), "on_foo"));
        assert_ne!(cb, Callback::method(counter.clone(), "on_bar"));
        assert_ne!(cb, Callback::method(other, "on_foo"));

        cb.invoke("foo", &[]).unwrap();
        assert_eq!(counter.hits.load(Ordering::SeqCst), 1);

        let missing = Callback::method(counter, "on_missing");
        assert!(matches!(
            missing.invoke("foo", &[]),
            Err(Error::NotInvocable { .. })
        ));
    }

    #[test]
    fn test_static_identity() {
        let a = Callback::static_method("Listener", "on_bar", on_bar);
        let b = Callback::static_method("Listener", "on_bar", on_bar);
        assert_eq!(a, b);
        assert_eq!(a.describe(), "Listener::on_bar");
        assert!(a.invoke("bar", &[]).is_ok());
    }

    #[test]
    fn test_invalid_fails_only_on_invoke() {
        let cb = Callback::invalid("not a callable");
        assert_eq!(cb, Callback::invalid(json!("not a callable")));

        let err = cb.invoke("foo", &[]).unwrap_err();
        assert!(matches!(err, Error::NotInvocable { ref event, .. } if event == "foo"));
    }

    #[test]
    fn test_listener_error_is_wrapped() {
        let cb = Callback::new(|args| {
            anyhow::ensure!(args.len() == 1, "expected one argument");
            Ok(())
        });

        assert!(cb.invoke("foo", &[json!(1)]).is_ok());
        let err = cb.invoke("foo", &[]).unwrap_err();
        assert!(matches!(err, Error::Listener { .. }));
        let source = std::error::Error::source(&err).expect("listener error has a source");
        assert_eq!(source.to_string(), "expected one argument");
    }
}
