pub mod leftist_heap;
pub mod priority_queue;

pub use leftist_heap::{HeapNode, LeftistHeap};
pub use priority_queue::BinaryHeapWrapper;
