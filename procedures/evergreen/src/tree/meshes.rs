pub mod bauble;
pub mod garland;
pub mod shell;
pub mod trunk;
