//! Process-wide pool of reusable encode buffers.
//!
//! [`acquire`] hands out a guard that dereferences to a `Vec<u8>`. Dropping
//! the guard clears the buffer and returns it to the pool, so release is
//! guaranteed on every exit path, error paths included. A borrowed buffer
//! is exclusively owned by the borrowing call until the guard drops.

use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Buffers that grew past this capacity are dropped instead of pooled.
const MAX_POOLED_CAPACITY: usize = 64 * 1024;

/// Upper bound on idle buffers kept alive.
const MAX_POOLED_BUFFERS: usize = 16;

static POOL: Pool = Pool {
    buffers: Mutex::new(Vec::new()),
};

struct Pool {
    buffers: Mutex<Vec<Vec<u8>>>,
}

/// Borrow a buffer from the process-wide pool.
pub(crate) fn acquire() -> PooledBuf {
    let buf = POOL
        .buffers
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop()
        .unwrap_or_default();
    PooledBuf { buf }
}

/// A pooled buffer, exclusively owned until dropped.
pub(crate) struct PooledBuf {
    buf: Vec<u8>,
}

impl Deref for PooledBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        let mut buf = mem::take(&mut self.buf);
        buf.clear();
        if buf.capacity() == 0 || buf.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        let mut pool = POOL.buffers.lock().unwrap_or_else(PoisonError::into_inner);
        if pool.len() < MAX_POOLED_BUFFERS {
            pool.push(buf);
        }
    }
}
