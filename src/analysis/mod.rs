/// Edge sampling and fingerprint hashing for tile images
pub mod edges;
