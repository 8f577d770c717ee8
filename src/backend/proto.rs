//! Generated bindings for `todo.v1.ToDoService`.
//!
//! Compiled from `proto/todo.proto` by `build.rs`.

tonic::include_proto!("todo.v1");

pub use to_do_service_client::ToDoServiceClient;

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn update_request_uses_schema_tags() {
        let request = UpdateTaskByIdRequest {
            task_id: 7,
            user_id: 1,
            title: Some("a".to_string()),
            is_done: None,
        };
        // task_id=1 varint, user_id=2 varint, title=3 length-delimited; unset is_done is omitted.
        assert_eq!(request.encode_to_vec(), vec![0x08, 7, 0x10, 1, 0x1a, 1, b'a']);
    }

    #[test]
    fn explicit_false_is_sent_for_optional_flag() {
        let request = UpdateTaskByIdRequest {
            is_done: Some(false),
            ..Default::default()
        };
        assert_eq!(request.encode_to_vec(), vec![0x20, 0]);
    }
}
