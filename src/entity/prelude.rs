//! 预导入模块，方便使用

pub use super::class_enrollments::{
    ActiveModel as ClassEnrollmentActiveModel, Entity as ClassEnrollments,
    Model as ClassEnrollmentModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::school_teachers::{
    ActiveModel as SchoolTeacherActiveModel, Entity as SchoolTeachers, Model as SchoolTeacherModel,
};
pub use super::schools::{
    ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
