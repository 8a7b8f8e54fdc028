//! Task record and rescue-state transitions.

use serde::{Deserialize, Serialize};

use super::ids::TaskId;

/// Task status as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pendente,
    Concluida,
}

/// A point-bearing unit of work inside a challenge.
///
/// Design:
/// - `status` is server truth; the client never flips it without confirmation.
/// - `pending_rescue` is a transient client-only flag: true only while a
///   completion request for this id is outstanding. It is never serialized,
///   so a fresh fetch always starts from server-reported state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub descricao: String,
    pub pontos: i64,
    pub status: TaskStatus,

    #[serde(skip)]
    pub pending_rescue: bool,
}

impl Task {
    pub fn is_pendente(&self) -> bool {
        self.status == TaskStatus::Pendente
    }

    /// Optimistic step: a completion request is about to go out.
    pub fn mark_in_flight(&mut self) {
        self.pending_rescue = true;
    }

    /// The server confirmed the completion.
    pub fn commit_rescue(&mut self) {
        self.status = TaskStatus::Concluida;
        self.pending_rescue = false;
    }

    /// The request failed; restore the pre-rescue state (status untouched).
    pub fn revert_rescue(&mut self) {
        self.pending_rescue = false;
    }
}

/// Counts by status for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub pendentes: usize,
    pub concluidas: usize,
    pub in_flight: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Pendente => counts.pendentes += 1,
                TaskStatus::Concluida => counts.concluidas += 1,
            }
            if task.pending_rescue {
                counts.in_flight += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_task() -> Task {
        Task {
            id: TaskId::new("t1"),
            descricao: "Correr 5km".to_string(),
            pontos: 10,
            status: TaskStatus::Pendente,
            pending_rescue: false,
        }
    }

    #[test]
    fn decodes_the_wire_shape() {
        let json = r#"{"id":"t1","descricao":"Correr 5km","pontos":10,"status":"PENDENTE"}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id.as_str(), "t1");
        assert_eq!(task.status, TaskStatus::Pendente);
        // Client-only flag always starts cleared, whatever the server sends.
        assert!(!task.pending_rescue);
    }

    #[test]
    fn commit_completes_and_clears_the_flag() {
        let mut task = pending_task();
        task.mark_in_flight();
        assert!(task.pending_rescue);
        assert_eq!(task.status, TaskStatus::Pendente);

        task.commit_rescue();
        assert_eq!(task.status, TaskStatus::Concluida);
        assert!(!task.pending_rescue);
    }

    #[test]
    fn revert_keeps_the_previous_status() {
        let mut task = pending_task();
        task.mark_in_flight();
        task.revert_rescue();

        assert_eq!(task.status, TaskStatus::Pendente);
        assert!(!task.pending_rescue);
    }

    #[test]
    fn counts_by_status() {
        let mut done = pending_task();
        done.commit_rescue();
        let mut in_flight = pending_task();
        in_flight.mark_in_flight();

        let counts = TaskCounts::of(&[pending_task(), done, in_flight]);
        assert_eq!(counts.pendentes, 2);
        assert_eq!(counts.concluidas, 1);
        assert_eq!(counts.in_flight, 1);
    }
}
