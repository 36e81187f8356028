use tokio::task::JoinHandle;

type Task = Box<dyn FnOnce() -> JoinHandle<()> + Send>;

pub struct TaskRunner {
    tasks: Vec<Task>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task<F>(&mut self, task: F)
    where
        F: FnOnce() -> JoinHandle<()> + Send + 'static,
    {
        self.tasks.push(Box::new(task));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn start_all(self) -> Vec<JoinHandle<()>> {
        self.tasks.into_iter().map(|task| task()).collect()
    }
}
