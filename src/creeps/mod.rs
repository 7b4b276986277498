pub mod role;
pub mod creep_loop;
pub mod memory;
pub mod fighter;
pub mod worker;
pub mod energy_sink;
