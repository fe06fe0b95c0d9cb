pub mod monkey_frontend;
pub mod treewalk_interpreter;
