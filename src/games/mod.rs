pub mod mormon_bridge;
pub mod rook;
