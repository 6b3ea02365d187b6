use super::arith::AddTask;
use super::arith::Divide2Task;
use super::arith::DivModTask;
use super::arith::MultiplyTask;
use super::counting::CountCharTask;
use super::counting::LengthTask;
use super::echo::EchoTask;
use super::echo::ReverseTask;
use super::filters::DedupTask;
use super::filters::RemoveCharTask;
use super::logic::BooleanLogicTask;
use super::logic::JudgeRouteCircleTask;
use super::printing::PrintTask;
use super::series::BottlesOfBeerTask;
use super::series::FibonacciTask;
use super::shuffle::RiffleTask;
use super::shuffle::ShiftLeftTask;
use super::shuffle::ShiftRightTask;
use super::shuffle::UnriffleTask;
use super::substring::SubstringTask;
use super::Task;

/// every task the catalog knows, in a stable order so numeric task ids
/// stay meaningful across runs.
pub fn names() -> &'static [&'static str] {
    &[
        "print-hello",
        "print",
        "echo",
        "reverse",
        "remove-char",
        "count-char",
        "add",
        "bool-logic",
        "shift-left",
        "shift-right",
        "length",
        "multiply",
        "divmod",
        "divide-2",
        "dedup",
        "fib",
        "count-down",
        "riffle",
        "unriffle",
        "substring",
        "circle-route",
    ]
}

pub fn make(name: &str) -> anyhow::Result<Box<dyn Task>> {
    let task: Box<dyn Task> = match name {
        "print-hello" => Box::new(PrintTask::hello()),
        "print" => Box::new(PrintTask::digits()),
        "echo" => Box::new(EchoTask::new()),
        "reverse" => Box::new(ReverseTask::new()),
        "remove-char" => Box::new(RemoveCharTask::new()),
        "count-char" => Box::new(CountCharTask::new()),
        "add" => Box::new(AddTask::new()),
        "bool-logic" => Box::new(BooleanLogicTask),
        "shift-left" => Box::new(ShiftLeftTask::new()),
        "shift-right" => Box::new(ShiftRightTask::new()),
        "length" => Box::new(LengthTask::new()),
        "multiply" => Box::new(MultiplyTask::new()),
        "divmod" => Box::new(DivModTask::new()),
        "divide-2" => Box::new(Divide2Task::new()),
        "dedup" => Box::new(DedupTask::new()),
        "fib" => Box::new(FibonacciTask),
        "count-down" => Box::new(BottlesOfBeerTask),
        "riffle" => Box::new(RiffleTask::new()),
        "unriffle" => Box::new(UnriffleTask::new()),
        "substring" => Box::new(SubstringTask::new()),
        "circle-route" => Box::new(JudgeRouteCircleTask::new()),
        unknown => anyhow::bail!("unknown task \"{}\"", unknown),
    };
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in names() {
            assert_eq!(*name, make(name).unwrap().name());
        }
    }

    #[test]
    fn unknown_names_are_refused() {
        assert!(make("no-such-task").is_err());
    }
}
