pub mod binlinks;
pub mod chrom;
pub mod interval;
pub mod io;
