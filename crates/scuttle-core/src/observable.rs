//! 변경 알림을 지원하는 값 컨테이너.
//!
//! 값이 바뀌면 등록된 구독자 콜백을 호출자 스레드에서 동기적으로 호출한다.
//! 콜백은 모든 락이 해제된 뒤 실행되므로 콜백 안에서 같은 값을
//! 읽거나 다시 쓸 수 있다.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 구독 식별자: [`Observable::unsubscribe`]에 사용
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// 관찰 가능한 값
pub struct Observable<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
    next_id: AtomicU64,
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + Sync,
{
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// 현재 값 (복제본)
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// 값 교체. 값이 실제로 바뀐 경우에만 구독자에게 알리고 `true`를 반환한다.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.write();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.notify(&value);
        true
    }

    /// 변경 구독
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(callback)));
        id
    }

    /// 구독 해제. 등록된 구독이었으면 `true`.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + PartialEq + Send + Sync + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.value.read())
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}
