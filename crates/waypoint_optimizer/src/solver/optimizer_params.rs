#[derive(Clone, Debug, Default)]
pub struct OptimizerParams {
    /// Size of the pool that sequences groups in parallel.
    pub threads: Threads,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Threads {
    Single,
    #[default]
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl std::str::FromStr for Threads {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "auto" | "" => Ok(Threads::Auto),
            "1" | "single" => Ok(Threads::Single),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .map(Threads::Multi)
                .ok_or_else(|| format!("invalid thread count '{other}'")),
        }
    }
}
