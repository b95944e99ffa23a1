/// Implement [`Model`](crate::Model) for a type, advertising the listed
/// capabilities.
///
/// The plain form also implements [`HasStore`](crate::HasStore) by resolving
/// the record's `COLLECTION` from the session. Use the `@capabilities` form
/// when `HasStore` is written by hand.
///
/// ```ignore
/// impl_model!(User, [validate, before_create, after_delete]);
/// impl_model!(@capabilities AuditedUser, [save]);
/// ```
///
/// Capability names: `save`, `validate`, `before_create`, `after_create`,
/// `before_update`, `after_update`, `before_delete`, `after_delete`.
#[macro_export]
macro_rules! impl_model {
    (@capabilities $ty:ty, [$($cap:ident),* $(,)?]) => {
        impl $crate::Model for $ty {
            $( $crate::__model_capability!($cap); )*
        }
    };
    ($ty:ty) => {
        $crate::impl_model!($ty, []);
    };
    ($ty:ty, [$($cap:ident),* $(,)?]) => {
        impl $crate::HasStore for $ty {
            fn store<'s>(
                &self,
                session: &'s dyn $crate::Session,
            ) -> ::std::boxed::Box<dyn $crate::Store + 's> {
                session.store(<$ty as $crate::Record>::COLLECTION)
            }
        }

        $crate::impl_model!(@capabilities $ty, [$($cap),*]);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __model_capability {
    (save) => {
        fn as_save(&mut self) -> Option<&mut dyn $crate::HasSave> {
            Some(self)
        }
    };
    (validate) => {
        fn as_validate(&self) -> Option<&dyn $crate::HasValidate> {
            Some(self)
        }
    };
    (before_create) => {
        fn as_before_create(&mut self) -> Option<&mut dyn $crate::HasBeforeCreate> {
            Some(self)
        }
    };
    (after_create) => {
        fn as_after_create(&mut self) -> Option<&mut dyn $crate::HasAfterCreate> {
            Some(self)
        }
    };
    (before_update) => {
        fn as_before_update(&mut self) -> Option<&mut dyn $crate::HasBeforeUpdate> {
            Some(self)
        }
    };
    (after_update) => {
        fn as_after_update(&mut self) -> Option<&mut dyn $crate::HasAfterUpdate> {
            Some(self)
        }
    };
    (before_delete) => {
        fn as_before_delete(&mut self) -> Option<&mut dyn $crate::HasBeforeDelete> {
            Some(self)
        }
    };
    (after_delete) => {
        fn as_after_delete(&mut self) -> Option<&mut dyn $crate::HasAfterDelete> {
            Some(self)
        }
    };
}
