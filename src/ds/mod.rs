pub mod clock_ring;
pub mod indexed_heap;
pub mod order_list;

pub use clock_ring::ClockRing;
pub use indexed_heap::IndexedMinHeap;
pub use order_list::{NodeId, OrderList};
