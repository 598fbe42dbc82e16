//! The six built-in scenarios.
//!
//! Each script is a hand-verified replay of what the runtime does for the
//! listing shown beside it. Order here is the tab order.

use super::{Listing, Scenario};
use crate::model::{Category, ContainerKind, Step};

const STACK: ContainerKind = ContainerKind::CallStack;
const MICRO: ContainerKind = ContainerKind::MicrotaskQueue;
const MACRO: ContainerKind = ContainerKind::MacrotaskQueue;
const WORKER: ContainerKind = ContainerKind::WorkerCallStack;

fn enter(id: &str, label: &str, to: ContainerKind, category: Category) -> Step {
    Step::enter(id, label, to, category)
}

fn exit(id: &str, label: &str, from: ContainerKind, category: Category) -> Step {
    Step::exit(id, label, from, category)
}

fn move_to(id: &str, label: &str, from: ContainerKind, to: ContainerKind, category: Category) -> Step {
    Step::transfer(id, label, from, to, category)
}

/// Enter immediately followed by exit: a call that returns right away.
fn call(id: &str, label: &str, stack: ContainerKind, category: Category) -> [Step; 2] {
    [
        enter(id, label, stack, category),
        exit(id, label, stack, category),
    ]
}

fn scenario(id: &str, title: &str, heap: &[&str], steps: Vec<Step>, listing: Listing) -> Scenario {
    Scenario {
        id: id.to_string(),
        title: title.to_string(),
        initial_heap: heap.iter().map(|s| s.to_string()).collect(),
        steps,
        listing: Some(listing),
    }
}

pub fn all() -> Vec<Scenario> {
    vec![timeout(), promise(), async_await(), complex(), priority(), worker()]
}

fn timeout() -> Scenario {
    use Category::{Macro, Sync};

    let mut steps = vec![enter("main", "main()", STACK, Sync)];
    steps.extend(call("logA", "console.log(\"A\")", STACK, Sync));
    steps.extend(call("setTimeout", "setTimeout()", STACK, Sync));
    steps.push(enter("timeout_cb", "setTimeout_Callback", MACRO, Macro));
    steps.extend(call("logC", "console.log(c)", STACK, Sync));
    steps.push(exit("main", "main()", STACK, Sync));
    steps.push(move_to("timeout_cb", "setTimeout_Callback", MACRO, STACK, Macro));
    steps.extend(call("logB", "console.log(\"B\")", STACK, Sync));
    steps.push(exit("timeout_cb", "setTimeout_Callback", STACK, Macro));

    scenario(
        "timeout",
        "setTimeout",
        &["main()", "setTimeout_Callback()", "c: \"C\""],
        steps,
        Listing::Single(
            r#"function main() {
  const c = 'C';
  console.log('A');
  setTimeout(() => {
    console.log('B');
  }, 0);
  console.log(c);
}
main();"#
                .to_string(),
        ),
    )
}

fn promise() -> Scenario {
    use Category::{Micro, Sync};

    let mut steps = vec![enter("main", "main()", STACK, Sync)];
    steps.extend(call("logA", "console.log(\"A\")", STACK, Sync));
    steps.push(enter("promise", "new Promise()", STACK, Sync));
    steps.extend(call("logResolve", "console.log('resolve')", STACK, Sync));
    steps.push(enter("promise_cb", "promise.then()", MICRO, Micro));
    steps.push(exit("promise", "new Promise()", STACK, Sync));
    steps.extend(call("logC", "console.log(c)", STACK, Sync));
    steps.push(exit("main", "main()", STACK, Sync));
    steps.push(move_to("promise_cb", "promise.then()", MICRO, STACK, Micro));
    steps.extend(call("logB", "console.log(\"B\")", STACK, Sync));
    steps.push(exit("promise_cb", "promise.then()", STACK, Micro));

    scenario(
        "promise",
        "Promise",
        &["main()", "promise.then()", "c: \"C\""],
        steps,
        Listing::Single(
            r#"function main() {
  const c = 'C';
  console.log('A');
  new Promise(res => {
    console.log('resolve');
    res();
  }).then(() => {
    console.log('B');
  });
  console.log(c);
}
main();"#
                .to_string(),
        ),
    )
}

fn async_await() -> Scenario {
    use Category::{Micro, Sync};

    let mut steps = vec![
        enter("script", "Global Script", STACK, Sync),
        enter("asyncTask", "asyncTask()", STACK, Sync),
    ];
    steps.extend(call("logA", "console.log(\"A\")", STACK, Sync));
    steps.push(enter("await", "await new Promise()", STACK, Sync));
    steps.extend(call("logResolve", "console.log('resolve')", STACK, Sync));
    steps.push(enter("async_rest", "Rest of asyncTask", MICRO, Micro));
    steps.push(exit("await", "await new Promise()", STACK, Sync));
    steps.push(exit("asyncTask", "asyncTask()", STACK, Sync));
    steps.extend(call("logC", "console.log(c)", STACK, Sync));
    steps.push(exit("script", "Global Script", STACK, Sync));
    steps.push(move_to("async_rest", "Rest of asyncTask", MICRO, STACK, Micro));
    steps.extend(call("logB", "console.log(\"B\")", STACK, Sync));
    steps.push(exit("async_rest", "Rest of asyncTask", STACK, Micro));

    scenario(
        "async",
        "async/await",
        &["asyncTask()", "c: \"C\""],
        steps,
        Listing::Single(
            r#"const c = 'C';
async function asyncTask() {
  console.log('A');
  await new Promise(res => {
    console.log('resolve');
    res();
  });
  console.log('B');
}
asyncTask();
console.log(c);"#
                .to_string(),
        ),
    )
}

fn complex() -> Scenario {
    use Category::{Macro, Micro, Sync};

    let mut steps = Vec::new();
    steps.extend(call("start", "console.log('Start')", STACK, Sync));
    steps.push(enter("complex", "complex()", STACK, Sync));
    steps.extend(call("asyncStart", "console.log('Async Start')", STACK, Sync));
    steps.extend(call("awaitTimeout", "await new Promise(...)", STACK, Sync));
    steps.push(enter("timeoutCb", "setTimeout callback", MACRO, Macro));
    steps.push(exit("complex", "complex()", STACK, Sync));
    steps.extend(call("end", "console.log('End')", STACK, Sync));
    steps.push(move_to("timeoutCb", "setTimeout callback", MACRO, STACK, Macro));
    steps.extend(call(
        "logTimeoutResolve",
        "console.log('setTimeout resolve')",
        STACK,
        Sync,
    ));
    steps.push(enter("continuation1", "(continuation)", MICRO, Micro));
    steps.push(exit("timeoutCb", "setTimeout callback", STACK, Macro));
    steps.push(move_to("continuation1", "(continuation)", MICRO, STACK, Micro));
    steps.extend(call("afterTimeout", "console.log('After timeout')", STACK, Sync));
    steps.push(enter("awaitPromise", "await new Promise()", STACK, Sync));
    steps.extend(call(
        "logPromiseResolve",
        "console.log('Promise resolve')",
        STACK,
        Sync,
    ));
    steps.push(enter("continuation2", "(continuation)", MICRO, Micro));
    steps.push(exit("awaitPromise", "await new Promise()", STACK, Sync));
    steps.push(exit("continuation1", "(continuation)", STACK, Micro));
    steps.push(move_to("continuation2", "(continuation)", MICRO, STACK, Micro));
    steps.extend(call("rest", "console.log('Rest of Async')", STACK, Sync));
    steps.push(exit("continuation2", "(continuation)", STACK, Micro));

    scenario(
        "complex",
        "Complex",
        &["complex()"],
        steps,
        Listing::Single(
            r#"console.log('Start');
async function complex() {
  console.log('Async Start');
  await new Promise(res => setTimeout(() => {
    console.log('setTimeout resolve');
    res();
  }, 500));
  console.log('After timeout');
  await new Promise(res => {
    console.log('Promise resolve');
    res();
  });
  console.log('Rest of Async');
}
complex();
console.log('End');"#
                .to_string(),
        ),
    )
}

fn priority() -> Scenario {
    use Category::{Macro, Micro, Sync};

    let mut steps = Vec::new();
    steps.extend(call("sync1", "1. Sync Start", STACK, Sync));
    steps.push(enter("setTimeout", "setTimeout()", STACK, Sync));
    steps.push(enter("macro_cb", "4. Macrotask", MACRO, Macro));
    steps.push(exit("setTimeout", "setTimeout()", STACK, Sync));
    steps.push(enter("promise", "Promise.resolve()", STACK, Sync));
    steps.push(enter("micro_cb", "3. Microtask", MICRO, Micro));
    steps.push(exit("promise", "Promise.resolve()", STACK, Sync));
    steps.extend(call("sync2", "2. Sync End", STACK, Sync));
    steps.push(move_to("micro_cb", "3. Microtask", MICRO, STACK, Micro));
    steps.push(exit("micro_cb", "3. Microtask", STACK, Micro));
    steps.push(move_to("macro_cb", "4. Macrotask", MACRO, STACK, Macro));
    steps.push(exit("macro_cb", "4. Macrotask", STACK, Macro));

    scenario(
        "priority",
        "Priority",
        &["setTimeout Callback", "Promise Callback"],
        steps,
        Listing::Single(
            r#"console.log('1. Sync Start');

setTimeout(() => {
  console.log('4. Macrotask');
}, 0);

Promise.resolve().then(() => {
  console.log('3. Microtask');
});

console.log('2. Sync End');"#
                .to_string(),
        ),
    )
}

fn worker() -> Scenario {
    use Category::{Macro, Sync, Worker};

    let mut steps = Vec::new();
    steps.extend(call("start_log", "console.log('Main: Script Start')", STACK, Sync));
    steps.extend(call("new_worker", "new Worker()", STACK, Sync));
    steps.extend(call("post", "myWorker.postMessage()", STACK, Sync));
    steps.push(Step::connection(
        "msg_to_worker",
        "Worker Connection",
        STACK,
        WORKER,
    ));
    steps.extend(call("end_log", "console.log('Main: Script End')", STACK, Sync));
    steps.push(enter("worker_onmessage_cb", "worker.onmessage", WORKER, Worker));
    steps.extend(call(
        "worker_log",
        "console.log('Worker: Received data')",
        WORKER,
        Worker,
    ));
    steps.extend(call("heavy_calc", "Heavy Calculation...", WORKER, Worker));
    steps.extend(call("worker_post", "worker.postMessage()", WORKER, Worker));
    steps.push(exit("worker_onmessage_cb", "worker.onmessage", WORKER, Worker));
    steps.push(Step::connection(
        "msg_to_main",
        "Worker Connection",
        WORKER,
        STACK,
    ));
    steps.push(enter("main_onmessage_cb", "main.onmessage", MACRO, Macro));
    steps.push(move_to("main_onmessage_cb", "main.onmessage", MACRO, STACK, Macro));
    steps.extend(call(
        "main_log_result",
        "console.log('Main: Result is...')",
        STACK,
        Sync,
    ));
    steps.push(exit("main_onmessage_cb", "main.onmessage", STACK, Macro));

    scenario(
        "worker",
        "Web Worker",
        &["myWorker", "onmessage", "postMessage"],
        steps,
        Listing::Split {
            main: r#"console.log('Main: Script Start');

const myWorker = new Worker('worker.js');

myWorker.onmessage = (e) => {
  console.log('Main: Result is ' + e.data);
};

myWorker.postMessage(50000000);

console.log('Main: Script End');"#
                .to_string(),
            worker: r#"self.onmessage = function(event) {
  console.log('Worker: Received data');

  let result = 0;
  for (let i = 0; i < event.data; i++) {
    result += Math.sqrt(i);
  }

  self.postMessage(result.toFixed(2));
};"#
                .to_string(),
        },
    )
}
